//! Mutual exclusion for radio buttons.
//!
//! Members do not know about each other; they share a [`RadioGroup`] handle
//! and ask it who is selected.

use std::cell::RefCell;
use std::rc::Rc;

/// Member handle issued by [`RadioGroup::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RadioId(u32);

#[derive(Debug, Default)]
struct GroupState {
    next_id: u32,
    members: Vec<RadioId>,
    selected: Option<RadioId>,
}

/// Shared, single-threaded group. Cloning gives another handle to the same
/// group.
#[derive(Debug, Clone, Default)]
pub struct RadioGroup {
    state: Rc<RefCell<GroupState>>,
}

impl RadioGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self) -> RadioId {
        let mut state = self.state.borrow_mut();
        let id = RadioId(state.next_id);
        state.next_id += 1;
        state.members.push(id);
        id
    }

    /// Remove a member. A selected member takes the selection with it.
    pub fn unregister(&self, id: RadioId) {
        let mut state = self.state.borrow_mut();
        state.members.retain(|m| *m != id);
        if state.selected == Some(id) {
            state.selected = None;
        }
    }

    pub fn len(&self) -> usize {
        self.state.borrow().members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn selected(&self) -> Option<RadioId> {
        self.state.borrow().selected
    }

    pub fn is_selected(&self, id: RadioId) -> bool {
        self.selected() == Some(id)
    }

    /// Make `id` the only selected member and return the member that lost
    /// the selection. Selecting the current selection, or an unknown id,
    /// changes nothing.
    pub fn select(&self, id: RadioId) -> Option<RadioId> {
        let mut state = self.state.borrow_mut();
        if !state.members.contains(&id) {
            log::debug!("radio select for unregistered member {id:?}");
            return None;
        }
        if state.selected == Some(id) {
            return None;
        }
        state.selected.replace(id)
    }

    /// Handles refer to the same group.
    pub fn same_group(&self, other: &RadioGroup) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}
