use tracing::{debug, info};

use crate::platform::IncomingMessage;

pub const STORY_COMMAND: &str = "/story";
const COMMAND_PREFIX: char = '/';

/// Which handler a matched message goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Story,
    Invert,
}

pub struct DispatchRule {
    pub name: &'static str,
    pub predicate: fn(&str) -> bool,
    pub route: Route,
}

/// `/story` alone or followed by a space; arguments are ignored.
pub fn is_story_command(text: &str) -> bool {
    text == STORY_COMMAND
        || text
            .strip_prefix(STORY_COMMAND)
            .is_some_and(|rest| rest.starts_with(' '))
}

/// Any non-empty text that is not a command.
pub fn is_plain_text(text: &str) -> bool {
    !text.is_empty() && !text.starts_with(COMMAND_PREFIX)
}

/// Ordered rule list; the first matching predicate wins.
pub struct MessageRouter {
    rules: Vec<DispatchRule>,
}

impl MessageRouter {
    pub fn new(rules: Vec<DispatchRule>) -> Self {
        for rule in &rules {
            info!("Registered {} handler", rule.name);
        }
        Self { rules }
    }

    pub fn route(&self, msg: &IncomingMessage) -> Option<Route> {
        let rule = self.rules.iter().find(|rule| (rule.predicate)(&msg.text))?;
        debug!(
            "{} message {} matched rule '{}'",
            msg.platform, msg.message_id, rule.name
        );
        Some(rule.route)
    }
}

impl Default for MessageRouter {
    /// The story command first, then the catch-all text rule.
    fn default() -> Self {
        Self::new(vec![
            DispatchRule {
                name: STORY_COMMAND,
                predicate: is_story_command,
                route: Route::Story,
            },
            DispatchRule {
                name: "text",
                predicate: is_plain_text,
                route: Route::Invert,
            },
        ])
    }
}
