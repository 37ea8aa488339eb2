use crate::models::telegram::{Update, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A `/name` command; `name` is lowercase without the slash or `@bot` suffix.
    Command { name: String },
    /// A button press carrying its callback data.
    Callback {
        query_id: String,
        data: String,
        message_id: Option<i64>,
    },
}

/// One command or button press, as handed to the router.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub update_id: i64,
    pub chat_id: i64,
    pub user: Option<User>,
    pub kind: EventKind,
}

impl InboundEvent {
    /// Returns `None` for updates that carry neither a command nor a callback,
    /// and for commands addressed to another bot.
    ///
    /// `bot_username` is this bot's `getMe` username; when unknown, any
    /// `@suffix` is accepted.
    pub fn from_update(update: Update, bot_username: Option<&str>) -> Option<Self> {
        if let Some(query) = update.callback_query {
            let chat_id = query
                .message
                .as_ref()
                .map(|m| m.chat.id)
                .unwrap_or(query.from.id);
            return Some(Self {
                update_id: update.update_id,
                chat_id,
                kind: EventKind::Callback {
                    query_id: query.id,
                    data: query.data.unwrap_or_default(),
                    message_id: query.message.map(|m| m.message_id),
                },
                user: Some(query.from),
            });
        }

        let message = update.message?;
        let name = parse_command(message.text.as_deref()?, bot_username)?;
        Some(Self {
            update_id: update.update_id,
            chat_id: message.chat.id,
            user: message.from,
            kind: EventKind::Command { name },
        })
    }

    pub fn label(&self) -> String {
        match &self.kind {
            EventKind::Command { name } => format!("/{}", name),
            EventKind::Callback { data, .. } => format!("callback:{}", data),
        }
    }

    pub fn first_name(&self) -> &str {
        self.user.as_ref().map(|u| u.first_name.as_str()).unwrap_or("")
    }
}

/// Extracts the command name from `/name@Bot args`.
///
/// A suffix naming a different bot yields `None`; usernames compare
/// case-insensitively.
pub fn parse_command(text: &str, bot_username: Option<&str>) -> Option<String> {
    let head = text.trim_start().split_whitespace().next()?;
    let head = head.strip_prefix('/')?;
    let (name, addressee) = match head.split_once('@') {
        Some((name, addressee)) => (name, Some(addressee)),
        None => (head, None),
    };
    if name.is_empty() {
        return None;
    }
    if let (Some(addressee), Some(own)) = (addressee, bot_username) {
        if !addressee.eq_ignore_ascii_case(own.trim_start_matches('@')) {
            return None;
        }
    }
    Some(name.to_ascii_lowercase())
}
