//! Sample domain used by the integration tests: shapes that can be moved and
//! renamed, plus a counter.

#![allow(dead_code)]

use commander::core::{Command, CommandRef, Completion, Lifecycle};
use commander::BlockCommand;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub center: (f64, f64),
    pub title: String,
}

pub type SharedShape = Arc<Mutex<Shape>>;

pub fn shape() -> SharedShape {
    Arc::new(Mutex::new(Shape::default()))
}

pub fn center(shape: &SharedShape) -> (f64, f64) {
    shape.lock().unwrap().center
}

pub fn title(shape: &SharedShape) -> String {
    shape.lock().unwrap().title.clone()
}

/// Moves a shape by a fixed offset.
pub struct MoveCommand {
    shape: SharedShape,
    offset: (f64, f64),
    lifecycle: Lifecycle,
}

impl MoveCommand {
    pub fn new(shape: &SharedShape, dx: f64, dy: f64) -> CommandRef {
        Arc::new(Self {
            shape: Arc::clone(shape),
            offset: (dx, dy),
            lifecycle: Lifecycle::new(),
        })
    }
}

impl Command for MoveCommand {
    fn perform(&self, _completion: Completion) {
        let mut shape = self.shape.lock().unwrap();
        shape.center.0 += self.offset.0;
        shape.center.1 += self.offset.1;
    }

    fn inversed(&self) -> CommandRef {
        MoveCommand::new(&self.shape, -self.offset.0, -self.offset.1)
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn description(&self) -> String {
        format!("move by {:?}", self.offset)
    }
}

/// Renames a shape, remembering the title it replaced.
pub struct UpdateTitleCommand {
    shape: SharedShape,
    title: String,
    previous: Arc<Mutex<Option<String>>>,
    inverted: bool,
    lifecycle: Lifecycle,
}

impl UpdateTitleCommand {
    pub fn new(shape: &SharedShape, title: &str) -> CommandRef {
        Arc::new(Self {
            shape: Arc::clone(shape),
            title: title.to_string(),
            previous: Arc::new(Mutex::new(None)),
            inverted: false,
            lifecycle: Lifecycle::new(),
        })
    }
}

impl Command for UpdateTitleCommand {
    fn perform(&self, _completion: Completion) {
        let mut shape = self.shape.lock().unwrap();
        if self.inverted {
            if let Some(previous) = self.previous.lock().unwrap().clone() {
                shape.title = previous;
            }
        } else {
            let replaced = std::mem::replace(&mut shape.title, self.title.clone());
            *self.previous.lock().unwrap() = Some(replaced);
        }
    }

    fn inversed(&self) -> CommandRef {
        Arc::new(Self {
            shape: Arc::clone(&self.shape),
            title: self.title.clone(),
            previous: Arc::clone(&self.previous),
            inverted: !self.inverted,
            lifecycle: Lifecycle::new(),
        })
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn description(&self) -> String {
        format!("rename to {}", self.title)
    }
}

/// Asynchronously lays shapes out on a diagonal, `i * 100` by `i * 10`,
/// relative to their current position.
pub struct LayoutCommand {
    shapes: Vec<SharedShape>,
    direction: f64,
    lifecycle: Lifecycle,
}

impl LayoutCommand {
    pub fn new(shapes: &[SharedShape]) -> CommandRef {
        Arc::new(Self {
            shapes: shapes.to_vec(),
            direction: 1.0,
            lifecycle: Lifecycle::new(),
        })
    }
}

impl Command for LayoutCommand {
    fn perform(&self, completion: Completion) {
        let shapes = self.shapes.clone();
        let direction = self.direction;
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            for (index, shape) in shapes.iter().enumerate() {
                let mut shape = shape.lock().unwrap();
                shape.center.0 += direction * index as f64 * 100.0;
                shape.center.1 += direction * index as f64 * 10.0;
            }
            completion.complete();
        });
    }

    fn inversed(&self) -> CommandRef {
        Arc::new(Self {
            shapes: self.shapes.clone(),
            direction: -self.direction,
            lifecycle: Lifecycle::new(),
        })
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn is_asynchronous(&self) -> bool {
        true
    }

    fn description(&self) -> String {
        format!("layout {} shape(s)", self.shapes.len())
    }
}

/// Wait until `command` reaches a final state.
///
/// No hook is left behind when the command has already settled.
pub async fn finished(command: &CommandRef) {
    if command.state().is_final() {
        return;
    }
    let notify = Arc::new(tokio::sync::Notify::new());
    let signal = Arc::clone(&notify);
    command.lifecycle().on_finish(move || signal.notify_one());
    // Finished between the first check and registration.
    if command.state().is_final() {
        return;
    }
    notify.notified().await;
}

pub fn counter() -> Arc<AtomicI64> {
    Arc::new(AtomicI64::new(0))
}

pub fn value(counter: &Arc<AtomicI64>) -> i64 {
    counter.load(Ordering::SeqCst)
}

/// Adds `amount` to the counter; the inverse subtracts it.
pub fn add(counter: &Arc<AtomicI64>, amount: i64) -> CommandRef {
    let (forward, backward) = (Arc::clone(counter), Arc::clone(counter));
    BlockCommand::new(
        move || {
            forward.fetch_add(amount, Ordering::SeqCst);
        },
        move || {
            backward.fetch_sub(amount, Ordering::SeqCst);
        },
    )
    .described(format!("add {amount}"))
    .into_ref()
}
