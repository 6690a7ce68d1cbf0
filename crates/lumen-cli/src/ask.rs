//! Terminal front end: one question in, answer, sources and follow-ups out.

use std::process::ExitCode;
use std::time::Duration;

use color_eyre::eyre;
use indicatif::{ProgressBar, ProgressStyle};
use lumen_core::{ask_with_settings, AnswerResult, Config, Stage};

use crate::overrides::QueryOverrides;

/// Runs one question through the pipeline and prints the result.
///
/// Invalid input is reported and yields a failing exit code; pipeline
/// failures are printed as part of the answer.
pub async fn run(
    config: &Config,
    question: &str,
    overrides: QueryOverrides,
    with_follow_ups: bool,
) -> eyre::Result<ExitCode> {
    let pipeline_config = overrides.apply(config.pipeline_config());

    if let Err(err) = pipeline_config.validate(question) {
        eprintln!("{err}");
        return Ok(ExitCode::FAILURE);
    }

    let mut spinner: Option<ProgressBar> = None;
    let result = ask_with_settings(config, pipeline_config, question, with_follow_ups, |stage| {
        if let Some(bar) = spinner.take() {
            bar.finish_and_clear();
        }
        spinner = stage_message(stage).map(start_spinner);
    })
    .await;

    print!("{}", render(&result, config.pipeline.source_display_limit));
    Ok(ExitCode::SUCCESS)
}

fn stage_message(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::Answering => Some("Searching and generating response..."),
        Stage::FollowUps => Some("Generating follow-up questions..."),
        Stage::Finished => None,
    }
}

fn start_spinner(message: &'static str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Formats an answer the way the terminal shows it.
///
/// The sources section is left out when there are no sources.
pub fn render(result: &AnswerResult, source_limit: usize) -> String {
    let mut out = format!("Answer:\n{}\n", result.answer_text);

    let sources = result.display_sources(source_limit);
    if !sources.is_empty() {
        out.push_str("\nSources:\n");
        for source in sources {
            out.push_str(&source.display_line());
            out.push('\n');
        }
    }

    if let Some(questions) = &result.follow_up_questions {
        out.push_str("\nFollow-Up Questions:\n");
        for question in questions {
            out.push_str(question);
            out.push('\n');
        }
    }

    out
}
