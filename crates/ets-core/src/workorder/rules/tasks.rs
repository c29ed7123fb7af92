//! Scope-of-works task extraction.

use tracing::{debug, trace};

use super::FieldExtractor;
use super::fields::collapse_whitespace;
use super::patterns::{TASK_MARKER, TASK_TERMINATOR};
use crate::models::work_order::WorkTask;

/// Phrase that marks a task as conditional.
const CONDITIONAL_PHRASE: &str = "if you cannot";

/// Extracts numbered tasks (`1.1`, `1.2`, ...) in document order.
pub struct TaskExtractor;

impl TaskExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TaskExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for TaskExtractor {
    type Output = WorkTask;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        let markers = find_markers(text);
        let mut tasks = Vec::with_capacity(markers.len());

        for (i, marker) in markers.iter().enumerate() {
            let body_end = markers
                .get(i + 1)
                .map(|next| next.start)
                .unwrap_or(text.len());
            let mut body = &text[marker.end..body_end];

            if let Some(stop) = TASK_TERMINATOR.find(body) {
                body = &body[..stop.start()];
            }

            let description = collapse_whitespace(body);
            if description.is_empty() {
                continue;
            }

            let is_conditional = description.to_lowercase().contains(CONDITIONAL_PHRASE);
            tasks.push(WorkTask::new(marker.number.clone(), description, is_conditional));
        }

        debug!("Extracted {} tasks", tasks.len());
        tasks
    }
}

/// An accepted task marker and the byte range it occupies.
struct Marker {
    number: String,
    position: (u32, u32),
    start: usize,
    end: usize,
}

/// Task markers in document order.
///
/// Markers at the start of a line are always accepted. A mid-line marker
/// must either open a list (`N.1`) or continue the previous task's
/// numbering, otherwise it is part of the previous task's text.
fn find_markers(text: &str) -> Vec<Marker> {
    let mut markers: Vec<Marker> = Vec::new();

    for caps in TASK_MARKER.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let (number, line_start) = match (caps.get(1), caps.get(2)) {
            (Some(number), _) => (number.as_str(), true),
            (None, Some(number)) => (number.as_str(), false),
            (None, None) => continue,
        };
        let Some(position) = parse_task_number(number) else {
            continue;
        };

        let accepted = line_start
            || match markers.last() {
                Some(previous) => continues(previous.position, position),
                None => position.1 == 1,
            };

        if accepted {
            markers.push(Marker {
                number: number.to_string(),
                position,
                start: whole.start(),
                end: whole.end(),
            });
        } else {
            trace!("ignoring {:?} inside task text", number);
        }
    }

    markers
}

fn parse_task_number(number: &str) -> Option<(u32, u32)> {
    let (major, minor) = number.split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}

/// Whether `next` is a plausible successor of `previous` (1.1 -> 1.2, 1.3 -> 2.1).
fn continues(previous: (u32, u32), next: (u32, u32)) -> bool {
    (next.0 == previous.0 && next.1 > previous.1) || (next.0 == previous.0 + 1 && next.1 == 1)
}

/// Extract scope-of-works tasks from text.
pub fn extract_tasks(text: &str) -> Vec<WorkTask> {
    TaskExtractor::new().extract_all(text)
}
