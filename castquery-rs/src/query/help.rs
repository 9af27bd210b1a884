//! Operator reference shown next to the search box.

const SEARCH_HELP: &str = "Search operators:
• + (AND): star + wars
• | (OR): star | trek
• * (prefix): cast*
• \"\" (phrase): \"star wars\"
• () (grouping): (star | trek) wars
• ~n (fuzzy): satr~3
• - (exclude): star -wars
• before: before:2025-04-20
• after: after:2025-04-20
• from: from:username
• channel: channel:farcaster
• parent: parent:url";

pub fn search_help() -> &'static str {
    SEARCH_HELP
}
