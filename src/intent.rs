// File: ./src/intent.rs
// Clickable widget areas and the broadcasts the widget reacts to.

/// Broadcast actions after which the widget must be redrawn.
pub const REDRAW_ACTIONS: [&str; 4] = [
    "android.intent.action.TIME_SET",
    "android.intent.action.DATE_CHANGED",
    "android.intent.action.TIMEZONE_CHANGED",
    "android.intent.action.PROVIDER_CHANGED",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionableView {
    OpenConfiguration,
    OpenCalendar,
}

impl ActionableView {
    pub const ALL: [ActionableView; 2] =
        [ActionableView::OpenConfiguration, ActionableView::OpenCalendar];

    /// Request code of the pending intent bound to the view.
    pub fn code(&self) -> i32 {
        match self {
            ActionableView::OpenConfiguration => 98,
            ActionableView::OpenCalendar => 99,
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            ActionableView::OpenConfiguration => "action.WIDGET_CONFIGURATION",
            ActionableView::OpenCalendar => "action.WIDGET_PRESS",
        }
    }

    pub fn from_action(action: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.action() == action)
    }
}

pub fn should_redraw_on(action: &str) -> bool {
    REDRAW_ACTIONS.iter().any(|a| *a == action)
}

/// What the host should do with a click intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    Ignored,
    Open {
        view: ActionableView,
        redraw: bool,
    },
    AskForPermissions,
}

pub fn process_intent(action: Option<&str>, read_calendar_permitted: bool) -> IntentOutcome {
    let Some(view) = action.and_then(ActionableView::from_action) else {
        return IntentOutcome::Ignored;
    };

    if read_calendar_permitted {
        IntentOutcome::Open { view, redraw: true }
    } else {
        log::debug!("Calendar permission missing for {}", view.action());
        IntentOutcome::AskForPermissions
    }
}
