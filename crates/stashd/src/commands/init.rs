//! Module for writing a `stash` configuration file

use super::*;

#[derive(Args, Clone, Default)]
pub struct InitOptions {
  /// Backend base URL, e.g. http://localhost:8000
  #[arg(long)]
  pub api_url: Option<String>,
  /// User whose collection to show (the phone number content was saved from)
  #[arg(long)]
  pub user_id: Option<String>,
}

/// Function for the [`Commands::Init`] in the CLI.
pub async fn init<I: UserInteraction>(interaction: &I, path: &Path, options: InitOptions) -> Result<()> {
  let InitOptions { api_url, user_id } = options;

  if path.exists()
    && !interaction.confirm(&format!(
      "Configuration already exists at {}, do you want to overwrite it?",
      path.display()
    ))?
  {
    interaction.reply(ResponseContent::Info("Keeping the existing configuration"))?;
    return Ok(());
  }

  let defaults = Config::default();
  let api_url = match api_url {
    Some(api_url) => api_url,
    None => answer_or(interaction.prompt(&format!("Backend URL [{}]", defaults.api_url))?, &defaults.api_url),
  };
  let user_id = match user_id {
    Some(user_id) => user_id,
    None => answer_or(interaction.prompt("User id (the phone number you save content from)")?, ""),
  };

  let config = defaults.with_api_url(api_url.trim()).with_user_id(user_id.trim());
  config.validate()?;
  config.save(path)?;
  trace!("Wrote {:?}", config);

  if config.user_id.is_empty() {
    interaction.reply(ResponseContent::Warning(&format!(
      "No user id set; the backend will return an empty collection until one is configured or {} \
       is exported",
      USER_ID_ENV
    )))?;
  }
  interaction.reply(ResponseContent::Success(&format!(
    "Configuration written to {}\nBackend: {}",
    path.display(),
    config.api_url
  )))
}

fn answer_or(answer: String, default: &str) -> String {
  if answer.trim().is_empty() {
    default.to_string()
  } else {
    answer
  }
}
