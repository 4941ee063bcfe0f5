use crate::args::LoginArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::User;
use crate::session::SessionFile;
use crate::{Config, Result};
use anyhow::Context;

/// Replaces the session with the identity in `args`. The other commands act on behalf of this
/// user.
pub async fn login(config: Config, args: &LoginArgs) -> Result<Out<User>> {
    let user = User::new(args.user_type(), args.email());
    let mut session = SessionFile::load(config.session_path())
        .await
        .pub_result(ErrorType::Session)?;
    session
        .login(&user, args.jwt())
        .await
        .context("Unable to save the session")
        .pub_result(ErrorType::Session)?;
    Ok(Out::new(
        format!("Logged in as {} ({})", user.email(), user.user_type()),
        user,
    ))
}
