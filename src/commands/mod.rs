/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes two top-level command modules:

- `chat`    Interactive session against the backend
- `render`  Offline rendering of a saved mock interview

The handlers stay small and delegate to `SessionClient` for every
backend interaction.
*/

use crate::api::{create_api, FinalizeResponse, MockInterview};
use crate::config::Config;
use crate::error::{ChartroomError, Result};
use crate::mode::{InterviewMode, UiState, KNOWN_PERSONAS};
use crate::session::{RevealPacing, SessionClient};
use crate::setup::SetupForm;
use crate::terminal::{describe_layout, TerminalView};
use crate::transcript::{render_mock_interview, NO_INTERVIEW_OUTPUT};
use crate::view::{Controls, SessionView};
use std::path::{Path, PathBuf};

// Special commands parser for the interactive session
pub mod special_commands;

// Interactive session handler
pub mod chat {
    //! Interactive session handler.
    //!
    //! Builds the API client and a terminal view, then runs a
    //! readline-based loop that turns special commands into session
    //! actions and sends everything else as a chat message.

    use super::*;
    use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    const NO_SESSION_HINT: &str = "Start a session first. Type /start.";

    /// Startup selections for an interactive session
    ///
    /// Every field falls back to the configuration (or an empty setup
    /// field) when not given.
    #[derive(Debug, Clone, Default)]
    pub struct ChatOptions {
        pub mode: Option<String>,
        pub submode: Option<String>,
        pub persona: Option<String>,
        pub resume: Option<PathBuf>,
        pub company: Option<String>,
        pub projects: Option<String>,
        pub experience: Option<String>,
        pub years: Option<String>,
    }

    /// Initial UI state from options, falling back to configuration
    ///
    /// # Errors
    ///
    /// Returns error if the requested or configured mode is unknown
    pub fn initial_state(config: &Config, options: &ChatOptions) -> Result<UiState> {
        let mode = match options.mode.as_deref() {
            Some(mode) => InterviewMode::parse_str(mode).map_err(ChartroomError::Config)?,
            None => config.initial_mode()?,
        };

        let mut state = UiState::new(mode);
        state.submode = options
            .submode
            .clone()
            .unwrap_or_else(|| config.session.default_submode.clone());

        let persona = options
            .persona
            .clone()
            .unwrap_or_else(|| config.session.default_persona.clone());
        if !KNOWN_PERSONAS.contains(&persona.as_str()) {
            tracing::warn!("Unknown persona {}, the backend may reject it", persona);
        }
        state.choose_persona(persona);

        Ok(state)
    }

    /// Initial setup form from options
    pub fn initial_form(options: &ChatOptions) -> SetupForm {
        SetupForm {
            resume_text: String::new(),
            company_context: options.company.clone().unwrap_or_default(),
            projects_text: options.projects.clone().unwrap_or_default(),
            experience_level: options.experience.clone().unwrap_or_default(),
            software_years: options.years.clone().unwrap_or_default(),
        }
    }

    /// Start interactive session mode
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `options` - Startup selections from the command line
    ///
    /// # Errors
    ///
    /// Returns error if the mode is unknown, the API client cannot be
    /// built, or the line editor fails to initialize. Failed session
    /// actions are reported in the terminal and do not end the loop.
    pub async fn run_chat(config: Config, options: ChatOptions) -> Result<()> {
        tracing::info!("Starting interactive session mode");

        let mut state = initial_state(&config, &options)?;
        let api = create_api(&config.server)?;
        let client = SessionClient::new(
            api,
            RevealPacing::from_millis(config.session.reveal_delay_ms),
        );

        let mut view = TerminalView::new(initial_form(&options));
        view.set_controls(Controls::idle(false));

        print_welcome_banner(&state, &config.server.base_url);

        if let Some(path) = &options.resume {
            client.load_resume(&mut view, path).await;
        }
        client.sync_panels(&state, &mut view);

        let mut rl = DefaultEditor::new()?;

        loop {
            let prompt = state.format_colored_prompt();
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    let command = match parse_special_command(trimmed) {
                        Ok(command) => command,
                        Err(e) => {
                            eprintln!("{}\n", e.to_string().red());
                            continue;
                        }
                    };

                    rl.add_history_entry(trimmed)?;

                    match command {
                        SpecialCommand::Start => {
                            client.start_session(&mut state, &mut view).await;
                        }
                        SpecialCommand::Finalize => {
                            if view.controls().chat {
                                client.finalize_session(&mut state, &mut view).await;
                            } else {
                                println!("{}", NO_SESSION_HINT.yellow());
                            }
                        }
                        SpecialCommand::SwitchMode(new_mode) => {
                            let old_mode = state.mode;
                            client.change_mode(&mut state, &mut view, new_mode);
                            println!("Switched from {} to {} mode", old_mode, new_mode);
                            if state.is_active() {
                                println!("Use /start to begin a session in this mode");
                            }
                            println!();
                        }
                        SpecialCommand::SetSubmode(submode) => {
                            state.submode = submode;
                            client.sync_panels(&state, &mut view);
                            println!("Submode: {}\n", display_or_none(&state.submode));
                        }
                        SpecialCommand::SelectPersona(persona) => {
                            state.choose_persona(persona);
                            client.apply_persona(&mut state, &mut view).await;
                        }
                        SpecialCommand::LoadResume(path) => {
                            client.load_resume(&mut view, &path).await;
                        }
                        SpecialCommand::SetCompany(text) => {
                            view.form_mut().company_context = text;
                            println!("Company context updated\n");
                        }
                        SpecialCommand::SetProjects(text) => {
                            view.form_mut().projects_text = text;
                            println!("Projects updated\n");
                        }
                        SpecialCommand::SetExperience(level) => {
                            view.form_mut().experience_level = level;
                            client.sync_panels(&state, &mut view);
                            println!(
                                "Experience: {}\n",
                                display_or_none(&view.form().experience_level)
                            );
                        }
                        SpecialCommand::SetYears(years) => {
                            view.form_mut().software_years = years;
                            client.sync_panels(&state, &mut view);
                            println!(
                                "Software years: {}\n",
                                display_or_none(&view.form().software_years)
                            );
                        }
                        SpecialCommand::ShowResult => {
                            client.fetch_result(&state, &mut view).await;
                        }
                        SpecialCommand::SaveResult(path) => {
                            save_result(view.result(), &path).await;
                        }
                        SpecialCommand::ShowStatus => {
                            print_status_display(&state, &view);
                        }
                        SpecialCommand::Help => {
                            print_help();
                        }
                        SpecialCommand::Exit => break,
                        SpecialCommand::None => {
                            if view.controls().chat {
                                client.send_message(&mut state, &mut view, trimmed).await;
                                println!();
                            } else {
                                println!("{}", NO_SESSION_HINT.yellow());
                            }
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    async fn save_result(result: Option<&str>, path: &Path) {
        let Some(text) = result else {
            println!("{}", "No final output yet. Use /finalize first.".yellow());
            return;
        };
        match tokio::fs::write(path, text).await {
            Ok(()) => println!("{}", format!("Saved final output to {}", path.display()).green()),
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", path.display(), e);
                eprintln!("{}", format!("Save failed: {}", e).red());
            }
        }
    }

    fn display_or_none(value: &str) -> &str {
        if value.is_empty() {
            "none"
        } else {
            value
        }
    }

    /// Display welcome banner at the start of an interactive session
    fn print_welcome_banner(state: &UiState, server: &str) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║            Chartroom Interactive Session - Welcome!          ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Mode:    {} ({})",
            state.mode.colored_tag(),
            state.mode.description()
        );
        println!("Persona: {}", state.persona);
        println!("Server:  {}\n", server);
        println!("Type '/start' to begin, '/help' for commands, 'exit' to quit\n");
    }

    /// Display detailed status information about the current session
    fn print_status_display(state: &UiState, view: &TerminalView) {
        let form = view.form();

        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Chartroom Session Status                  ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("{}\n", state.status());
        println!(
            "Resume:          {}",
            if form.resume_text.is_empty() {
                "none".to_string()
            } else {
                format!("{} chars", form.resume_text.chars().count())
            }
        );
        println!("Company:         {}", display_or_none(&form.company_context));
        println!("Projects:        {}", display_or_none(&form.projects_text));
        println!("Experience:      {}", display_or_none(&form.experience_level));
        println!("Software years:  {}", display_or_none(&form.software_years));
        println!("Feed entries:    {}", view.feed().len());
        println!(
            "Final output:    {}\n",
            if view.result().is_some() {
                "ready"
            } else {
                "none"
            }
        );
        println!("{}", describe_layout(&view.layout()));
        println!("Prompt Format:   {}", state.format_colored_prompt());
        println!();
    }

}

// Offline mock interview rendering
pub mod render {
    //! Render a saved finalize response or mock interview file.

    use super::*;

    /// Render a JSON file as plain text
    ///
    /// Accepts either a whole finalize response (with a `mock_interview`
    /// key) or a bare mock interview object.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a JSON object of
    /// the expected shape
    pub async fn render_file(path: &Path) -> Result<String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(ChartroomError::from)?;
        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(ChartroomError::from)?;

        let interview: Option<MockInterview> = if value.get("mock_interview").is_some() {
            serde_json::from_value::<FinalizeResponse>(value)
                .map_err(ChartroomError::from)?
                .mock_interview
        } else {
            Some(serde_json::from_value(value).map_err(ChartroomError::from)?)
        };

        let text = render_mock_interview(interview.as_ref());
        tracing::debug!("Rendered {} chars from {}", text.len(), path.display());
        Ok(if text.is_empty() {
            NO_INTERVIEW_OUTPUT.to_string()
        } else {
            text
        })
    }

    /// Print the rendered file to stdout
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be rendered
    pub async fn run_render(path: &Path) -> Result<()> {
        println!("{}", render_file(path).await?);
        Ok(())
    }

}
