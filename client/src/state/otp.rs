//! Fixed-length one-time-code entry.
//!
//! DESIGN
//! ======
//! Pure state machine behind the `OtpInput` component: one decimal digit per
//! slot, focus that advances on entry and retreats on backspace, and all-or-
//! nothing paste. Every transition reports whether it produced a completed
//! code so the component can emit exactly one `on_complete` per completion.
//!
//! A transition emits when it wrote at least one slot and every slot is filled
//! afterwards. Re-entering or re-pasting over a full entry therefore emits the
//! latest code again; backspace never emits.

#[cfg(test)]
#[path = "otp_test.rs"]
mod otp_test;

/// Default number of code slots.
pub const DEFAULT_OTP_LENGTH: usize = 6;

/// Result of applying one input event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryOutcome {
    /// `false` when the event was rejected and nothing changed.
    pub accepted: bool,
    /// Assembled code when this event completed the entry.
    pub completed: Option<String>,
}

impl EntryOutcome {
    fn rejected() -> Self {
        Self::default()
    }

    fn accepted() -> Self {
        Self { accepted: true, completed: None }
    }
}

/// In-progress code entry with `length` slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpEntry {
    slots: Vec<Option<char>>,
    focus: usize,
}

impl Default for OtpEntry {
    fn default() -> Self {
        Self::new(DEFAULT_OTP_LENGTH)
    }
}

impl OtpEntry {
    /// Empty entry; a zero length is treated as one slot.
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self { slots: vec![None; length.max(1)], focus: 0 }
    }

    #[must_use]
    pub fn length(&self) -> usize {
        self.slots.len()
    }

    /// Index of the slot that should hold keyboard focus.
    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<char> {
        self.slots.get(index).copied().flatten()
    }

    /// Slot values as strings, empty for unfilled slots.
    #[cfg(test)]
    pub fn digits(&self) -> Vec<String> {
        self.slots
            .iter()
            .map(|slot| slot.map(String::from).unwrap_or_default())
            .collect()
    }

    #[cfg(test)]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Assembled code, only when every slot is filled.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        self.slots.iter().copied().collect::<Option<String>>()
    }

    /// Put a digit into `index` and advance focus.
    pub fn enter(&mut self, index: usize, ch: char) -> EntryOutcome {
        if index >= self.slots.len() || !ch.is_ascii_digit() {
            return EntryOutcome::rejected();
        }
        self.slots[index] = Some(ch);
        if index + 1 < self.slots.len() {
            self.focus = index + 1;
        } else {
            self.focus = index;
        }
        self.after_write()
    }

    /// Apply the raw value of a slot's `input` event.
    ///
    /// An empty value clears the slot in place. Otherwise the most recently
    /// typed character wins, so typing over a filled slot replaces it.
    pub fn input(&mut self, index: usize, value: &str) -> EntryOutcome {
        if index >= self.slots.len() {
            return EntryOutcome::rejected();
        }
        match value.chars().last() {
            None => {
                self.slots[index] = None;
                self.focus = index;
                EntryOutcome::accepted()
            }
            Some(ch) => self.enter(index, ch),
        }
    }

    /// Backspace pressed in `index`.
    ///
    /// A filled slot is cleared and keeps focus; an empty slot moves focus
    /// back one slot without touching the previous value.
    pub fn backspace(&mut self, index: usize) -> EntryOutcome {
        if index >= self.slots.len() {
            return EntryOutcome::rejected();
        }
        if self.slots[index].take().is_some() {
            self.focus = index;
        } else if index > 0 {
            self.focus = index - 1;
        }
        EntryOutcome::accepted()
    }

    /// Fill slots from pasted text.
    ///
    /// Text with any non-digit character is rejected outright, whitespace
    /// included. Empty text is rejected too: a paste that carries no digits
    /// must not count as an accepted event. Otherwise leading slots are filled in order, trailing slots
    /// keep their values, and focus lands on `min(len(text), length - 1)`.
    pub fn paste(&mut self, text: &str) -> EntryOutcome {
        if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
            return EntryOutcome::rejected();
        }
        let pasted = text.chars().count();
        for (slot, ch) in self.slots.iter_mut().zip(text.chars()) {
            *slot = Some(ch);
        }
        self.focus = pasted.min(self.slots.len() - 1);
        self.after_write()
    }

    /// Clear every slot and focus the first one.
    pub fn reset(&mut self) {
        self.slots.fill(None);
        self.focus = 0;
    }

    fn after_write(&self) -> EntryOutcome {
        EntryOutcome { accepted: true, completed: self.code() }
    }
}

/// Whether `code` is a complete `length`-digit code.
#[must_use]
pub fn is_complete_code(code: &str, length: usize) -> bool {
    code.chars().count() == length && code.chars().all(|c| c.is_ascii_digit())
}
