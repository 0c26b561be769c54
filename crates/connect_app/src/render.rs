use connect_core::{CandidateView, DialogViewModel, HostAction, SessionPhase};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CandidateRow<'a> {
    url: &'a str,
    description: &'a str,
}

pub fn render_dialog(view: &DialogViewModel) -> String {
    let phase = match view.phase {
        SessionPhase::Idle => "closed".to_string(),
        SessionPhase::ComputingHistoryCache => "probing history".to_string(),
        SessionPhase::Ready => match view.history_count {
            Some(count) => format!("{count} remembered"),
            None => "ready".to_string(),
        },
    };
    let mut out = format!("> {:<40} [{phase}]\n", view.query);
    out.push_str(&render_list(&view.candidates));
    out
}

pub fn render_list(candidates: &[CandidateView]) -> String {
    if candidates.is_empty() {
        return "  (no candidates)\n".to_string();
    }
    let width = candidates
        .iter()
        .map(|item| item.label.len())
        .max()
        .unwrap_or(0);
    candidates
        .iter()
        .enumerate()
        .map(|(index, item)| {
            format!(
                "  {:>2}. {:<width$}  {}\n",
                index + 1,
                item.label,
                item.description
            )
        })
        .collect()
}

pub fn candidates_json(candidates: &[CandidateView]) -> serde_json::Result<String> {
    let rows: Vec<_> = candidates
        .iter()
        .map(|item| CandidateRow {
            url: &item.label,
            description: &item.description,
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

pub fn render_actions() -> String {
    HostAction::ALL
        .iter()
        .map(|action| {
            format!(
                "{:<30} {:<36} {}\n",
                action.id(),
                action.label(),
                action.default_keybinding().unwrap_or("-")
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(label: &str, description: &str) -> CandidateView {
        CandidateView {
            label: label.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn list_is_numbered_from_one_and_aligned() {
        let text = render_list(&[
            item("http://a", "Status: 200"),
            item("https://long.example", "Error: Unresolved"),
        ]);
        assert_eq!(
            text,
            "   1. http://a              Status: 200\n   2. https://long.example  Error: Unresolved\n"
        );
    }

    #[test]
    fn json_rows_use_url_and_description() {
        let json = candidates_json(&[item("http://a", "Status: 200")]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["url"], "http://a");
        assert_eq!(parsed[0]["description"], "Status: 200");
    }

    #[test]
    fn actions_list_default_keybinding() {
        let text = render_actions();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("electron.remote.connect "));
        assert!(lines[0].contains("Remote: Connect to a remote Backend"));
        assert!(lines[0].ends_with("ctrl+alt+r"));
        assert!(lines[1].starts_with("electron.remote.history.clear "));
        assert!(lines[1].ends_with(" -"));
    }
}
