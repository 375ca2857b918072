//! Property-based tests for dispatcher history and command composition.
//!
//! These tests use proptest to verify the undo/redo laws hold across
//! many randomly generated editing sessions.

mod common;

use commander::core::{Command, CommandState};
use commander::{AppMode, AppValidator, CommandDispatcher, CommandError, GroupCommand};
use common::{add, counter, value};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone, Debug)]
enum Op {
    Invoke(i64),
    Undo,
    Redo,
}

prop_compose! {
    fn arbitrary_amount()(amount in -1000i64..1000) -> i64 {
        amount
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_amount().prop_map(Op::Invoke),
        Just(Op::Undo),
        Just(Op::Redo),
    ]
}

fn editor() -> CommandDispatcher {
    CommandDispatcher::new(AppValidator::new(AppMode::Full))
}

proptest! {
    #[test]
    fn invoke_appends_and_clears_redo(ops in prop::collection::vec(arbitrary_op(), 0..30)) {
        let total = counter();
        let mut dispatcher = editor();

        for op in ops {
            match op {
                Op::Invoke(amount) => {
                    let before = dispatcher.undo_count();
                    prop_assert!(dispatcher.invoke(add(&total, amount)).unwrap().is_invoked());
                    prop_assert_eq!(dispatcher.undo_count(), before + 1);
                    prop_assert_eq!(dispatcher.redo_count(), 0);
                }
                Op::Undo => {
                    let had = dispatcher.can_undo();
                    prop_assert_eq!(dispatcher.undo().is_ok(), had);
                }
                Op::Redo => {
                    let had = dispatcher.can_redo();
                    prop_assert_eq!(dispatcher.redo().is_ok(), had);
                }
            }

            let undo_ids: HashSet<_> = dispatcher.commands().iter().map(|c| c.id()).collect();
            prop_assert!(dispatcher
                .undone_commands()
                .iter()
                .all(|c| !undo_ids.contains(&c.id())));
        }
    }

    #[test]
    fn value_tracks_undo_stack(ops in prop::collection::vec(arbitrary_op(), 0..30)) {
        let total = counter();
        let mut dispatcher = editor();
        let mut applied: Vec<i64> = Vec::new();
        let mut undone: Vec<i64> = Vec::new();

        for op in ops {
            match op {
                Op::Invoke(amount) => {
                    dispatcher.invoke(add(&total, amount)).unwrap();
                    applied.push(amount);
                    undone.clear();
                }
                Op::Undo => {
                    if dispatcher.undo().is_ok() {
                        undone.extend(applied.pop());
                    }
                }
                Op::Redo => {
                    if dispatcher.redo().is_ok() {
                        applied.extend(undone.pop());
                    }
                }
            }
            prop_assert_eq!(value(&total), applied.iter().sum::<i64>());
        }
    }

    #[test]
    fn undo_then_redo_is_identity(amounts in prop::collection::vec(arbitrary_amount(), 1..20)) {
        let total = counter();
        let mut dispatcher = editor();
        for amount in amounts {
            dispatcher.invoke(add(&total, amount)).unwrap();
        }

        let (undo_before, redo_before, value_before) =
            (dispatcher.undo_count(), dispatcher.redo_count(), value(&total));

        dispatcher.undo().unwrap();
        dispatcher.redo().unwrap();

        prop_assert_eq!(dispatcher.undo_count(), undo_before);
        prop_assert_eq!(dispatcher.redo_count(), redo_before);
        prop_assert_eq!(value(&total), value_before);
    }

    #[test]
    fn group_with_own_inverse_is_identity(
        amount in arbitrary_amount(),
        start in arbitrary_amount()
    ) {
        let total = counter();
        let mut dispatcher = editor();
        dispatcher.invoke(add(&total, start)).unwrap();

        let command = add(&total, amount);
        let group = GroupCommand::new([Arc::clone(&command), command.inversed()]).into_ref();
        dispatcher.invoke(group).unwrap();

        prop_assert_eq!(value(&total), start);
        prop_assert_eq!(dispatcher.undo_count(), 2);
    }

    #[test]
    fn double_group_and_its_inverse_cancel(amount in arbitrary_amount()) {
        let total = counter();
        let command = add(&total, amount);
        let group = GroupCommand::new([Arc::clone(&command), command]);

        let inverse = group.inversed();
        inverse.invoke().unwrap();
        prop_assert_eq!(value(&total), -2 * amount);

        inverse.inversed().invoke().unwrap();
        prop_assert_eq!(value(&total), 0);
    }

    #[test]
    fn counted_undo_stops_at_boundary(amounts in prop::collection::vec(arbitrary_amount(), 0..15)) {
        let total = counter();
        let mut dispatcher = editor();
        let k = amounts.len();
        for amount in amounts {
            dispatcher.invoke(add(&total, amount)).unwrap();
        }

        let err = dispatcher.undo_many(k + 1).unwrap_err();

        prop_assert_eq!(err, CommandError::EmptyHistory { requested: k + 1, completed: k });
        prop_assert_eq!(dispatcher.undo_count(), 0);
        prop_assert_eq!(dispatcher.redo_count(), k);
        prop_assert_eq!(value(&total), 0);
    }

    #[test]
    fn read_only_never_mutates(amounts in prop::collection::vec(arbitrary_amount(), 1..10)) {
        let total = counter();
        let mut dispatcher = CommandDispatcher::new(AppValidator::new(AppMode::ReadOnly));

        for amount in amounts {
            let command = add(&total, amount);
            let outcome = dispatcher.invoke(Arc::clone(&command)).unwrap();
            prop_assert!(outcome.is_forbidden());
            prop_assert_eq!(command.state(), CommandState::Forbidden);
        }

        prop_assert_eq!(value(&total), 0);
        prop_assert_eq!(dispatcher.undo_count(), 0);
    }
}
