use crate::config::GtdConfig;
use crate::store;

// ---------------------------------------------------------------------------
// StepView
// ---------------------------------------------------------------------------

/// Where a checklist step points the user inside the task store, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepView {
    Inbox,
    Areas,
    TagQuery(String),
}

impl StepView {
    pub fn url(&self) -> String {
        match self {
            StepView::Inbox => store::show_url("inbox"),
            StepView::Areas => store::show_url("areas"),
            StepView::TagQuery(tag) => store::query_url(tag),
        }
    }
}

// ---------------------------------------------------------------------------
// ChecklistStep
// ---------------------------------------------------------------------------

/// One step of the guided walkthrough: a heading, fixed guidance lines, and
/// an optional store view to open. The walkthrough carries no selection
/// logic; the interactive loop lives in the CLI.
#[derive(Debug, Clone)]
pub struct ChecklistStep {
    pub title: &'static str,
    pub guidance: &'static [&'static str],
    pub view: Option<StepView>,
}

/// The fixed review walkthrough. Step text never varies; the two tag-backed
/// views come from the GTD settings.
pub fn steps(gtd: &GtdConfig) -> Vec<ChecklistStep> {
    vec![
        ChecklistStep {
            title: "COLLECT LOOSE PAPERS AND MATERIALS",
            guidance: &[
                "Gather all physical items, notes, and digital information that needs processing.",
                "This includes papers, receipts, business cards, and anything else in your physical inbox.",
            ],
            view: None,
        },
        ChecklistStep {
            title: "PROCESS ALL INBOX ITEMS",
            guidance: &[
                "If it takes less than 2 minutes, do it now.",
                "Delegate what you can.",
                "Defer actionable items as tasks.",
                "File reference materials.",
                "Trash what's not needed.",
            ],
            view: Some(StepView::Inbox),
        },
        ChecklistStep {
            title: "REVIEW PREVIOUS CALENDAR DATA",
            guidance: &[
                "Look at your calendar for the past week.",
                "Capture any missed actions or follow-ups.",
                "Note lessons learned from meetings or events.",
            ],
            view: None,
        },
        ChecklistStep {
            title: "REVIEW UPCOMING CALENDAR",
            guidance: &[
                "Look at your calendar for the next two weeks.",
                "Identify preparation tasks needed for upcoming events.",
                "Block time for important work.",
            ],
            view: None,
        },
        ChecklistStep {
            title: "REVIEW WAITING FOR LIST",
            guidance: &[
                "Follow up on items that are taking too long.",
                "Update the status of items as needed.",
                "Remove completed items.",
            ],
            view: Some(StepView::TagQuery(gtd.waiting_for_tag.clone())),
        },
        ChecklistStep {
            title: "REVIEW PROJECT LISTS",
            guidance: &[
                "Go through each project: does it have a clear outcome and at least one next action?",
                "Use a configured review run to surface the projects most overdue for attention.",
            ],
            view: None,
        },
        ChecklistStep {
            title: "REVIEW GOALS AND OBJECTIVES",
            guidance: &[
                "Are your projects aligned with your goals?",
                "Do any goals need adjusting?",
                "Are new projects needed to reach them?",
            ],
            view: None,
        },
        ChecklistStep {
            title: "REVIEW AREAS OF FOCUS",
            guidance: &[
                "Are all areas of your life and work represented?",
                "Do any neglected areas need projects?",
                "Should any areas be added or removed?",
            ],
            view: Some(StepView::Areas),
        },
        ChecklistStep {
            title: "REVIEW SOMEDAY/MAYBE LIST",
            guidance: &[
                "Activate items whose time has come.",
                "Delete items that no longer interest you.",
                "Add new someday/maybe items.",
            ],
            view: Some(StepView::TagQuery(gtd.someday_tag.clone())),
        },
        ChecklistStep {
            title: "BE CREATIVE AND COURAGEOUS",
            guidance: &[
                "What new initiatives would you like to start?",
                "Are there bold moves you should make?",
                "What would make the biggest positive difference?",
            ],
            view: None,
        },
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
