//! Submit-vs-newline keyboard policy.
//!
//! [`decide`] is a pure function of the key event and the Enter-submits
//! mode. [`resolve`] then downgrades a submit to [`Decision::Ignore`] when
//! the draft cannot be submitted.

/// The key portion of a key event, as far as the policy cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// Any other key.
    Other,
}

/// A key event with the modifiers the policy looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
}

impl KeyPress {
    /// Bare Enter.
    pub fn enter() -> Self {
        Self {
            key: Key::Enter,
            shift: false,
            alt: false,
        }
    }

    /// Shift+Enter.
    pub fn shift_enter() -> Self {
        Self {
            shift: true,
            ..Self::enter()
        }
    }

    /// Alt+Enter.
    pub fn alt_enter() -> Self {
        Self {
            alt: true,
            ..Self::enter()
        }
    }

    /// A non-Enter key with no modifiers.
    pub fn other() -> Self {
        Self {
            key: Key::Other,
            shift: false,
            alt: false,
        }
    }
}

/// What a key event should do to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Submit the draft; suppress default newline insertion.
    Submit,
    /// Insert a newline into the draft.
    Newline,
    /// No special handling; default key behavior proceeds.
    Ignore,
}

/// Decide what a key event does given the Enter-submits mode.
///
/// Shift+Enter is always a newline. Otherwise Enter submits when
/// `enter_submits` is on, or when Alt is held.
pub fn decide(press: KeyPress, enter_submits: bool) -> Decision {
    match press.key {
        Key::Other => Decision::Ignore,
        Key::Enter if press.shift => Decision::Newline,
        Key::Enter if enter_submits || press.alt => Decision::Submit,
        Key::Enter => Decision::Newline,
    }
}

/// Downgrade a submit to ignore when the draft is not submittable.
pub fn resolve(decision: Decision, submittable: bool) -> Decision {
    match decision {
        Decision::Submit if !submittable => Decision::Ignore,
        other => other,
    }
}
