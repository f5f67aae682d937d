//! Icon resources owned by the foreground loop
//!
//! Entries reference icons by handle. Icons created during a scan belong to
//! the entry that got them and must be released when that entry goes away;
//! the default icon is shared and lives as long as the store.

/// Handle into an [`IconStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconHandle(usize);

/// A decoded icon. The terminal renderer draws the badge text in place of
/// the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub badge: String,
}

impl Icon {
    pub fn new(badge: impl Into<String>) -> Self {
        Self {
            badge: badge.into(),
        }
    }

    /// Two-letter badge built from the first alphanumeric characters of the
    /// first two words (or the first two characters of a single word).
    pub fn monogram(name: &str) -> Self {
        let mut words = name
            .split_whitespace()
            .filter_map(|w| w.chars().find(|c| c.is_alphanumeric()));
        let badge: String = match (words.next(), words.next()) {
            (Some(a), Some(b)) => [a, b].iter().collect(),
            _ => name.chars().filter(|c| c.is_alphanumeric()).take(2).collect(),
        };
        if badge.is_empty() {
            Self::new("??")
        } else {
            Self::new(badge.to_uppercase())
        }
    }
}

pub struct IconStore {
    slots: Vec<Option<Icon>>,
    free: Vec<usize>,
    default: IconHandle,
}

impl IconStore {
    pub fn new(default_icon: Icon) -> Self {
        Self {
            slots: vec![Some(default_icon)],
            free: Vec::new(),
            default: IconHandle(0),
        }
    }

    pub fn default_icon(&self) -> IconHandle {
        self.default
    }

    pub fn create(&mut self, icon: Icon) -> IconHandle {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(icon);
                IconHandle(slot)
            }
            None => {
                self.slots.push(Some(icon));
                IconHandle(self.slots.len() - 1)
            }
        }
    }

    pub fn get(&self, handle: IconHandle) -> Option<&Icon> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    /// Release an icon. Returns `false` for the default icon or a handle that
    /// was already released.
    pub fn release(&mut self, handle: IconHandle) -> bool {
        if handle == self.default {
            return false;
        }
        match self.slots.get_mut(handle.0) {
            Some(slot @ Some(_)) => {
                *slot = None;
                self.free.push(handle.0);
                true
            }
            _ => false,
        }
    }

    /// Number of live icons, not counting the default.
    pub fn live(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count() - 1
    }
}

impl Default for IconStore {
    fn default() -> Self {
        Self::new(Icon::new("??"))
    }
}
