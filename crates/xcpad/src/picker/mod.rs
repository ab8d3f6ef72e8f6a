use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::FuzzySelect;
use xcpad_common::XcpadError;

/// A user-facing label paired with an opaque payload returned on selection
pub struct PickerItem<T> {
    pub label: String,
    pub context: T,
}

impl<T> PickerItem<T> {
    pub fn new(label: impl Into<String>, context: T) -> Self {
        Self {
            label: label.into(),
            context,
        }
    }
}

/// Boundary for interactive selection, stubbed in tests.
///
/// Dismissing the picker surfaces `SelectionCancelled`; callers propagate it
/// rather than defaulting to anything.
pub trait Picker {
    fn pick<T>(&self, title: &str, items: Vec<PickerItem<T>>) -> Result<T>;
}

/// dialoguer-backed picker
pub struct TerminalPicker;

impl Picker for TerminalPicker {
    fn pick<T>(&self, title: &str, items: Vec<PickerItem<T>>) -> Result<T> {
        // Nothing to offer reads as a dismissal, not a hang
        if items.is_empty() {
            return Err(XcpadError::SelectionCancelled.into());
        }

        let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();

        let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt(title)
            .items(&labels)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(index) => {
                let mut items = items;
                Ok(items.swap_remove(index).context)
            }
            None => Err(XcpadError::SelectionCancelled.into()),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Picker that always takes the first item, cancelling when empty
    pub struct FirstItemPicker;

    impl Picker for FirstItemPicker {
        fn pick<T>(&self, _title: &str, items: Vec<PickerItem<T>>) -> Result<T> {
            let mut items = items;
            if items.is_empty() {
                return Err(XcpadError::SelectionCancelled.into());
            }
            Ok(items.remove(0).context)
        }
    }

    /// Picker that behaves like the user pressing escape
    pub struct CancellingPicker;

    impl Picker for CancellingPicker {
        fn pick<T>(&self, _title: &str, _items: Vec<PickerItem<T>>) -> Result<T> {
            Err(XcpadError::SelectionCancelled.into())
        }
    }

    /// Picker that records the title and labels it was shown
    pub struct RecordingPicker {
        pub seen: std::cell::RefCell<Vec<(String, Vec<String>)>>,
    }

    impl RecordingPicker {
        pub fn new() -> Self {
            Self {
                seen: std::cell::RefCell::new(Vec::new()),
            }
        }
    }

    impl Picker for RecordingPicker {
        fn pick<T>(&self, title: &str, items: Vec<PickerItem<T>>) -> Result<T> {
            let labels = items.iter().map(|item| item.label.clone()).collect();
            self.seen.borrow_mut().push((title.to_string(), labels));
            let mut items = items;
            if items.is_empty() {
                return Err(XcpadError::SelectionCancelled.into());
            }
            Ok(items.remove(0).context)
        }
    }
}
