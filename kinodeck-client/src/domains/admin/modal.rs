//! Confirmation dialog state machine.
//!
//! Pure state, no I/O and no clock. The dialog collects whatever input
//! an action needs before anything irreversible is dispatched, and all
//! local validation for that input lives here. While a confirmed action
//! is in flight the dialog ignores every interaction, so an in-flight
//! destructive call can never be cancelled or double-sent through it.

use kinodeck_model::{ActionRequest, AdminActionKind, EntityRef};

/// How a front end should style the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Danger,
    Warning,
    Info,
}

/// Free-text input the dialog collects beyond a yes/no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSpec {
    pub label: &'static str,
    /// Required input blocks confirmation until non-blank.
    pub required: bool,
}

/// Static dialog content, fixed when it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalConfig {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub kind: ModalKind,
    pub input: Option<InputSpec>,
}

impl ModalConfig {
    /// The standard dialog for `action` against `target`, with `label`
    /// naming the target for a human (a user's name, a movie title).
    pub fn for_action(action: AdminActionKind, target: EntityRef, label: &str) -> Self {
        let noun = target.kind.as_str();
        match action {
            AdminActionKind::Block => Self {
                title: format!("Block {noun}"),
                message: format!("Block {label}? They lose access immediately."),
                confirm_text: "Block".into(),
                kind: ModalKind::Danger,
                input: Some(InputSpec { label: "Reason", required: true }),
            },
            AdminActionKind::Unblock => Self {
                title: format!("Unblock {noun}"),
                message: format!("Restore access for {label}?"),
                confirm_text: "Unblock".into(),
                kind: ModalKind::Info,
                input: None,
            },
            AdminActionKind::Delete => Self {
                title: format!("Delete {noun}"),
                message: format!("Permanently delete {label}? This cannot be undone."),
                confirm_text: "Delete".into(),
                kind: ModalKind::Danger,
                input: None,
            },
            AdminActionKind::Approve => Self {
                title: format!("Approve {noun}"),
                message: format!("Approve {label}?"),
                confirm_text: "Approve".into(),
                kind: ModalKind::Info,
                input: Some(InputSpec { label: "Reason", required: false }),
            },
            AdminActionKind::Reject => Self {
                title: format!("Reject {noun}"),
                message: format!("Reject {label}? The applicant sees the reason you give."),
                confirm_text: "Reject".into(),
                kind: ModalKind::Warning,
                input: Some(InputSpec { label: "Reason", required: true }),
            },
            AdminActionKind::VerifyBank => Self {
                title: "Verify bank details".into(),
                message: format!(
                    "Mark {label}'s bank details as verified? This authorizes payouts."
                ),
                confirm_text: "Verify".into(),
                kind: ModalKind::Warning,
                input: Some(InputSpec { label: "Notes", required: false }),
            },
        }
    }
}

/// Outcome of a confirm attempt.
#[derive(Debug, PartialEq)]
pub enum Confirmed {
    /// Validation passed; dispatch this request.
    Dispatch(ActionRequest),
    /// Required input missing; a validation message is now showing.
    Invalid,
    /// Nothing to confirm (closed, or already submitting).
    Ignored,
}

#[derive(Debug, Default)]
pub enum ConfirmModal {
    #[default]
    Closed,
    /// Showing, collecting input.
    Open {
        config: ModalConfig,
        request: ActionRequest,
        input: String,
        error: Option<String>,
    },
    /// Confirmed and in flight. Inert until the action settles.
    Submitting {
        config: ModalConfig,
        request: ActionRequest,
        input: String,
    },
}

impl ConfirmModal {
    /// Open for `request`. Refused while a dialog is already up.
    pub fn open(&mut self, config: ModalConfig, request: ActionRequest) -> bool {
        match self {
            ConfirmModal::Closed => {
                *self = ConfirmModal::Open { config, request, input: String::new(), error: None };
                true
            }
            _ => false,
        }
    }

    /// Update the collected input. Clears any validation message so the
    /// operator is not corrected mid-keystroke.
    pub fn set_input(&mut self, text: String) {
        if let ConfirmModal::Open { input, error, .. } = self {
            *input = text;
            *error = None;
        }
    }

    /// Attempt to confirm. Validation happens here, before any effect
    /// exists: a required input left blank produces a local message and
    /// the request never leaves the dialog.
    pub fn confirm(&mut self) -> Confirmed {
        match std::mem::take(self) {
            ConfirmModal::Open { config, mut request, input, .. } => {
                let missing = config
                    .input
                    .as_ref()
                    .is_some_and(|spec| spec.required && input.trim().is_empty());
                if missing {
                    let label = config.input.as_ref().map(|spec| spec.label).unwrap_or("Input");
                    let error = Some(format!("{label} is required"));
                    *self = ConfirmModal::Open { config, request, input, error };
                    return Confirmed::Invalid;
                }

                apply_input(&mut request, &input);
                *self = ConfirmModal::Submitting {
                    config,
                    request: request.clone(),
                    input,
                };
                Confirmed::Dispatch(request)
            }
            other => {
                *self = other;
                Confirmed::Ignored
            }
        }
    }

    /// Dismiss. Only an idle open dialog can be cancelled.
    pub fn cancel(&mut self) -> bool {
        match self {
            ConfirmModal::Open { .. } => {
                *self = ConfirmModal::Closed;
                true
            }
            _ => false,
        }
    }

    /// The confirmed action succeeded: close and forget the input.
    pub fn settle_success(&mut self) {
        if matches!(self, ConfirmModal::Submitting { .. }) {
            *self = ConfirmModal::Closed;
        }
    }

    /// The confirmed action failed: reopen with the input preserved so
    /// the operator corrects it instead of retyping. Returns false when
    /// the dialog was not submitting (the failure belongs elsewhere).
    pub fn settle_failure(&mut self, message: String) -> bool {
        match std::mem::take(self) {
            ConfirmModal::Submitting { config, request, input } => {
                *self = ConfirmModal::Open { config, request, input, error: Some(message) };
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ConfirmModal::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ConfirmModal::Submitting { .. })
    }

    pub fn config(&self) -> Option<&ModalConfig> {
        match self {
            ConfirmModal::Open { config, .. } | ConfirmModal::Submitting { config, .. } => {
                Some(config)
            }
            ConfirmModal::Closed => None,
        }
    }

    pub fn input(&self) -> Option<&str> {
        match self {
            ConfirmModal::Open { input, .. } | ConfirmModal::Submitting { input, .. } => {
                Some(input)
            }
            ConfirmModal::Closed => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ConfirmModal::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }
}

/// Route collected input into the request field the action reads.
fn apply_input(request: &mut ActionRequest, input: &str) {
    let text = input.trim();
    if text.is_empty() {
        return;
    }
    match request.kind {
        AdminActionKind::Block | AdminActionKind::Approve | AdminActionKind::Reject => {
            request.reason = Some(text.to_string());
        }
        AdminActionKind::VerifyBank | AdminActionKind::Unblock | AdminActionKind::Delete => {
            request.notes = Some(text.to_string());
        }
    }
}
