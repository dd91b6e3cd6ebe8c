use actix_session::Session;

/// Session key the Todoist API token is stored under. The token never
/// leaves the cookie session; nothing is written to durable storage.
const TOKEN_KEY: &str = "todoist_api_token";

pub fn api_token(session: &Session) -> Option<String> {
    session
        .get::<String>(TOKEN_KEY)
        .unwrap_or(None)
        .filter(|t| !t.trim().is_empty())
}

pub fn remember_api_token(session: &Session, token: &str) {
    let _ = session.insert(TOKEN_KEY, token.trim());
}

pub fn forget_api_token(session: &Session) {
    session.remove(TOKEN_KEY);
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert("flash", message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>("flash").unwrap_or(None);
    if flash.is_some() {
        session.remove("flash");
    }
    flash
}
