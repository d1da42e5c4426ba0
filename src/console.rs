//! Line-oriented terminal front end for the flow page

use crate::flow::{FlowId, Message, MessageType};
use crate::runtime::{PageHandle, PageUpdate};
use crate::state_machine::Event;
use crate::view::{InputSlot, PageView, THANK_YOU_TEXT};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast;

pub const HELP_TEXT: &str = "\
Commands:
  /flow <id>   switch to another flow
  /help        show this help
  /quit        leave
Anything else answers the current step. For choices, type the number or the label.
On a free-text step, a line starting with an unknown /word is sent as the answer.";

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    SwitchFlow(FlowId),
    SubmitText(String),
    SelectChoice(usize),
}

impl Command {
    /// Event to send to the page, if any
    pub fn into_event(self) -> Option<Event> {
        match self {
            Command::SwitchFlow(flow_id) => Some(Event::SwitchFlow { flow_id }),
            Command::SubmitText(text) => Some(Event::SubmitText { text }),
            Command::SelectChoice(index) => Some(Event::SelectChoice { index }),
            Command::Help | Command::Quit => None,
        }
    }
}

/// Parse a line against the widget currently on screen.
pub fn parse_line(line: &str, input: &InputSlot) -> Result<Command, String> {
    let line = line.trim();

    if let Some(rest) = line.strip_prefix('/') {
        let mut parts = rest.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some("help"), _) => Ok(Command::Help),
            (Some("quit" | "exit"), _) => Ok(Command::Quit),
            (Some("flow"), Some(id)) => id
                .parse()
                .map(Command::SwitchFlow)
                .map_err(|_| format!("Not a flow id: {id}")),
            (Some("flow"), None) => Err("Usage: /flow <id>".to_string()),
            _ if *input == InputSlot::TextInput => Ok(Command::SubmitText(line.to_string())),
            _ => Err(format!("Unknown command: {line}")),
        };
    }

    if let InputSlot::MultipleChoice { responses } = input {
        if let Ok(number) = line.parse::<usize>() {
            if number == 0 {
                return Err("Choices start at 1".to_string());
            }
            return Ok(Command::SelectChoice(number - 1));
        }
        if let Some(index) = responses
            .iter()
            .position(|choice| choice.label().eq_ignore_ascii_case(line))
        {
            return Ok(Command::SelectChoice(index));
        }
    }

    Ok(Command::SubmitText(line.to_string()))
}

fn format_message(message: &Message) -> String {
    match message.kind {
        MessageType::UserReply => format!("  you  > {}", message.display_text()),
        _ => format!("  flow > {}", message.display_text()),
    }
}

fn format_input(input: &InputSlot) -> Vec<String> {
    match input {
        InputSlot::Empty => vec![],
        InputSlot::TextInput => vec!["  (type your answer)".to_string()],
        InputSlot::MultipleChoice { responses } => responses
            .iter()
            .enumerate()
            .map(|(i, choice)| format!("  [{}] {}", i + 1, choice.label()))
            .collect(),
        InputSlot::ThankYou => vec![format!("  {THANK_YOU_TEXT}")],
    }
}

/// Tracks what is already on screen so each view prints only what changed
#[derive(Debug, Default)]
pub struct Transcript {
    flow: Option<FlowId>,
    /// Header waits for the first loaded content of each flow
    header_shown: bool,
    printed: Vec<Message>,
    input: Option<InputSlot>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Widget currently shown, used to interpret the next line
    pub fn input(&self) -> InputSlot {
        self.input.clone().unwrap_or(InputSlot::Empty)
    }

    /// Lines to print for a new view
    pub fn apply(&mut self, view: &PageView) -> Vec<String> {
        let mut lines = Vec::new();

        let restarted =
            self.flow != Some(view.flow_id) || !view.feed.starts_with(&self.printed);
        if restarted {
            self.flow = Some(view.flow_id);
            self.header_shown = false;
            self.printed.clear();
            self.input = None;
        }

        if !self.header_shown && !view.feed.is_empty() {
            let title = if view.flow_header.is_empty() {
                format!("Flow {}", view.flow_id)
            } else {
                format!("{} (flow {})", view.flow_header, view.flow_id)
            };
            lines.push(format!("== {title} == [{}]", view.member.name));
            self.header_shown = true;
        }

        for message in &view.feed[self.printed.len()..] {
            lines.push(format_message(message));
        }
        self.printed = view.feed.clone();

        if view.advance_pending {
            lines.push("  ...".to_string());
        }
        if self.input.as_ref() != Some(&view.input) {
            lines.extend(format_input(&view.input));
            self.input = Some(view.input.clone());
        }
        lines
    }
}

/// Run the console until the user quits, stdin closes, or the page stops.
pub async fn run_console(
    handle: PageHandle,
    mut updates: broadcast::Receiver<PageUpdate>,
) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut transcript = Transcript::new();

    println!("{HELP_TEXT}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_line(&line, &transcript.input()) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{HELP_TEXT}"),
                    Ok(command) => {
                        if let Some(event) = command.into_event() {
                            if let Err(e) = handle.send(event).await {
                                tracing::error!(error = %e, "Flow page is gone");
                                break;
                            }
                        }
                    }
                    Err(message) => println!("! {message}"),
                }
            }
            update = updates.recv() => match update {
                Ok(PageUpdate::View(view)) => {
                    for line in transcript.apply(&view) {
                        println!("{line}");
                    }
                }
                Ok(PageUpdate::Rejected { message } | PageUpdate::Error { message }) => {
                    println!("! {message}");
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Console fell behind page updates");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}
