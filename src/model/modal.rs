//! Modal stack for overlays drawn above the table

/// Which form is open: a new record or an edit of an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(i64),
}

/// A modal overlay shown on top of the main UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    QuitConfirm,
    /// Input form for adding or editing a record
    RecordForm(FormMode),
    /// Confirmation before deleting a record
    DeleteConfirm { id: i64 },
    Help,
}

/// Only the top modal receives input
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Push unless the same modal is already on top; toggles it off otherwise
    pub fn toggle(&mut self, modal: Modal) {
        if self.top() == Some(&modal) {
            self.stack.pop();
        } else {
            self.stack.push(modal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::RecordForm(FormMode::Add));
        stack.push(Modal::QuitConfirm);

        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert_eq!(stack.pop(), Some(Modal::RecordForm(FormMode::Add)));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_modal_stack_toggle() {
        let mut stack = ModalStack::new();
        stack.toggle(Modal::Help);
        assert_eq!(stack.top(), Some(&Modal::Help));

        stack.toggle(Modal::Help);
        assert!(stack.is_empty());

        stack.push(Modal::DeleteConfirm { id: 3 });
        stack.toggle(Modal::Help);
        assert_eq!(stack.top(), Some(&Modal::Help));
        stack.pop();
        assert_eq!(stack.top(), Some(&Modal::DeleteConfirm { id: 3 }));
    }
}
