// SPDX-License-Identifier: MIT

//! The movie pitch team.
//!
//! A bounded writers-room loop (questioner → researcher → writer → critic,
//! up to five rounds, cut short when the critic exits the loop), then a
//! title pass, two supplemental reports with no ordering constraint between
//! them, and file persistence. Agents hand work to each other through
//! session state, not through chained messages.

use crate::adk::agent::{Agent, AgentEvent, LlmAgent, LoopAgent, ParallelAgent, SequentialAgent};
use crate::adk::error::AdkError;
use crate::adk::model::Model;
use crate::adk::session::Session;
use crate::adk::tool::ExitLoopTool;
use crate::backlot::tools::{AppendToStateTool, FileWriterTool, WikipediaTool};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Iteration bound for the writers room.
const MAX_WRITING_ROUNDS: u32 = 5;

pub fn questioner(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("questioner", model)
            .with_description("Asks good questions to prepare for a round of research.")
            .with_instruction(
                r#"
    PROMPT:
    {{ prompt? }}

    STORY_SO_FAR:
    {{ story_so_far? }}

    CRITIQUE:
    {{ critique? }}

    INSTRUCTIONS:
    Create a list of research questions based on:
    - Finding good historical characters related to the PROMPT
    - If there is a STORY_SO_FAR, what questions could help deepen
    its grounding on historical facts?
    - If there is a CRITIQUE, what research could address the
    improvements suggested there?

    Output only 5 questions.
    "#,
            )
            .with_output_key("questions"),
    )
}

pub fn researcher(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("researcher", model)
            .with_description("Answer research questions using Wikipedia.")
            .with_instruction(
                r#"
    INSTRUCTIONS:
    - Use your 'wikipedia' tool to conduct research based on the
      PROMPT and QUESTIONS.
    - Use the 'append_to_state' tool to add your research
      to the field 'research'.

    PROMPT:
    {{ prompt? }}

    QUESTIONS:
    {{ questions? }}
    "#,
            )
            .with_tools(vec![
                Arc::new(WikipediaTool::new()),
                Arc::new(AppendToStateTool::new()),
            ]),
    )
}

pub fn writer(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("writer", model)
            .with_description("Write a plot outline about a historical character.")
            .with_instruction(
                r#"
    INSTRUCTIONS:
    Your goal is to write a logline and three-act plot outline for an inspiring movie
    about the historical character(s) described by the prompt {{ prompt? }}, grounding
    it in history provided by the RESEARCH provided. If there is a STORY_SO_FAR,
    improve upon it. If there is CRITIQUE, use those thoughts to improve upon the
    outline.

    STORY_SO_FAR:
    {{ story_so_far? }}

    RESEARCH:
    {{ research? }}

    CRITIQUE:
    {{ critique? }}
    "#,
            )
            .with_output_key("story_so_far"),
    )
}

pub fn critic(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("critic", model)
            .with_description("Offers a critique of the story so that it can be improved.")
            .with_instruction(
                r#"
    INSTRUCTIONS:
    Offer critique of the following aspects of the STORY_SO_FAR:
    - Does it feel grounded in a real time period in history?
    - Does it sufficiently incorporate historical details from the RESEARCH?
    - Does it meet a satisfying three-act cinematic structure?
    - Do the characters' struggles seem engaging?
    If the STORY_SO_FAR does a good job with these questions,
    exit the writing loop with your 'exit_loop' tool.

    STORY_SO_FAR:
    {{ story_so_far? }}

    RESEARCH:
    {{ research? }}
    "#,
            )
            .with_output_key("critique")
            .with_tool(Arc::new(ExitLoopTool::new())),
    )
}

pub fn titler(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("titler", model)
            .with_description("Writes a great movie title.")
            .with_instruction(
                r#"
    INSTRUCTIONS:
    Provide a marketable, contemporary movie title suggestion
    for the movie described in the STORY_SO_FAR. If a title has been
    suggested in STORY_SO_FAR, you can use it, or replace it with
    a better one.
    Do not attempt to improve the story.
    Only provide 1 title.

    STORY_SO_FAR:
    {{ story_so_far? }}
    "#,
            )
            .with_output_key("title"),
    )
}

pub fn box_office_report(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("box_office_report", model)
            .with_description("Considers the box office potential of this film")
            .with_instruction(
                r#"
    TITLE:
    {{ title? }}

    STORY_SO_FAR:
    {{ story_so_far? }}

    INSTRUCTIONS:
    Write a report on the box office potential of a movie
    with a title of TITLE and a plot like that described in STORY_SO_FAR
    based on the reported box office performance of other recent films.
    "#,
            )
            .with_output_key("box_office_report"),
    )
}

pub fn casting_agent(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("casting_agent", model)
            .with_description("Generates casting ideas for this film")
            .with_instruction(
                r#"
    TITLE:
    {{ title? }}

    STORY_SO_FAR:
    {{ story_so_far? }}

    INSTRUCTIONS:
    Generate ideas for casting for the characters described in STORY_SO_FAR
    based on who has done well with similar roles in the past.
    "#,
            )
            .with_output_key("casting_report"),
    )
}

pub fn file_writer(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LlmAgent::new("file_writer", model)
            .with_description("Save the movie outline to a file")
            .with_instruction(
                r#"
    INSTRUCTIONS:
    - Use your 'file_writer_tool' to create a new txt file named after the MOVIE_TITLE.
    - Write to the 'movie_pitches' directory.
    - Set 'overwrite' to 'true'.
    - The file should include:
        - The MOVIE_TITLE
        - Any description, synopsis, and plot outline from STORY_SO_FAR
        - The BOX_OFFICE_REPORT
        - The CASTING_REPORT

    MOVIE_TITLE: {{ title? }}

    STORY_SO_FAR:
    {{ story_so_far? }}

    BOX_OFFICE_REPORT:
    {{ box_office_report? }}

    CASTING_REPORT:
    {{ casting_report? }}
    "#,
            )
            .with_tool(Arc::new(FileWriterTool::new())),
    )
}

/// Iterates through research and writing to improve a movie plot outline.
pub fn writers_room(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        LoopAgent::new(
            "writers_room",
            vec![
                questioner(model.clone()),
                researcher(model.clone()),
                writer(model.clone()),
                critic(model),
            ],
        )
        .with_description("Iterates through research and writing to improve a movie plot outline.")
        .with_max_iterations(MAX_WRITING_ROUNDS),
    )
}

/// Supplemental reports, generated with no ordering constraint between them.
pub fn supplemental_reports(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        ParallelAgent::new(
            "supplemental_reports",
            vec![box_office_report(model.clone()), casting_agent(model)],
        )
        .with_description("Considers the commercial angles of this film."),
    )
}

/// Writes a film plot, titles it, and saves it.
pub fn story_team(model: Arc<dyn Model>) -> Arc<dyn Agent> {
    Arc::new(
        SequentialAgent::new(
            "story_team",
            vec![
                writers_room(model.clone()),
                titler(model.clone()),
                supplemental_reports(model.clone()),
                file_writer(model),
            ],
        )
        .with_description("Writes a film plot, titles it, and saves it."),
    )
}

/// Result of a pitch run: the closing agent response plus the full state,
/// which carries the title, outline, and reports.
pub struct PitchOutcome {
    pub response: String,
    pub state: Value,
}

/// Develop a movie pitch for a user prompt.
///
/// Plays the greeter role: the prompt is appended to state under `prompt`,
/// then the story team runs against the session.
pub async fn run_pitch(model: Arc<dyn Model>, prompt: &str) -> Result<PitchOutcome, AdkError> {
    let session = Session::new(prompt);
    session.append("prompt", Value::String(prompt.to_string()));

    let team = story_team(model);
    let response = team.run(&session).await?;

    Ok(PitchOutcome {
        response,
        state: session.snapshot(),
    })
}

/// Streaming variant of [run_pitch], emitting agent events as the team works.
pub async fn run_pitch_stream(
    model: Arc<dyn Model>,
    prompt: &str,
    tx: mpsc::Sender<AgentEvent>,
) -> Result<PitchOutcome, AdkError> {
    let session = Session::new(prompt);
    session.append("prompt", Value::String(prompt.to_string()));

    let team = story_team(model);
    let response = team.run_stream(&session, tx).await?;

    Ok(PitchOutcome {
        response,
        state: session.snapshot(),
    })
}
