//! Persona-scaffolded prompt templates.
//!
//! Each templated stage sends a system prompt, one request line carrying the
//! current idea, and a fixed list of assistant turns attributed to personas.
//! The turns are scaffolding only; the model never picks a persona.

use crate::providers::ChatMessage;
use std::fmt;

/// A named voice in the scaffolded conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Persona {
    /// Game Designer A.
    DesignerA,
    /// Game Designer B.
    DesignerB,
    /// Gamer C.
    Gamer,
    /// Game Critic D.
    Critic,
    /// Game GDD Writer E.
    GddWriter,
    /// Project Manager F.
    ProjectManager,
    /// Concept Artist G.
    ConceptArtist,
    /// The reviewer behind every QA pass.
    QaAgent,
}

impl Persona {
    /// Display name used as the line prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DesignerA => "Game Designer A",
            Self::DesignerB => "Game Designer B",
            Self::Gamer => "Gamer C",
            Self::Critic => "Game Critic D",
            Self::GddWriter => "Game GDD Writer E",
            Self::ProjectManager => "Project Manager F",
            Self::ConceptArtist => "Concept Artist G",
            Self::QaAgent => "QA Agent",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declarative description of one templated completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTemplate {
    /// System message.
    pub system_prompt: &'static str,
    /// Text placed before the idea in the user message.
    pub request_prefix: &'static str,
    /// Assistant turns, in order.
    pub scaffold: &'static [(Persona, &'static str)],
}

impl StageTemplate {
    /// Builds the message list for the given idea.
    #[must_use]
    pub fn messages(&self, idea: &str) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.scaffold.len() + 2);
        messages.push(ChatMessage::system(self.system_prompt));
        messages.push(ChatMessage::user(format!("{}{idea}", self.request_prefix)));
        messages.extend(
            self.scaffold
                .iter()
                .map(|(persona, line)| ChatMessage::assistant(format!("{persona}: {line}"))),
        );
        messages
    }
}

/// Designers, a player and a critic iterating on the idea.
pub static DISCUSSION: StageTemplate = StageTemplate {
    system_prompt: "You are a group of game design professionals discussing a game idea.",
    request_prefix: "Discuss and iterate on this game idea: ",
    scaffold: &[
        (Persona::DesignerA, "Let's consider..."),
        (Persona::DesignerB, "I think we should..."),
        (Persona::Gamer, "From a player's perspective..."),
        (Persona::Critic, "Critically speaking..."),
    ],
};

/// The document team writing or revising the GDD.
pub static GDD_WRITING: StageTemplate = StageTemplate {
    system_prompt: "You are a team working on a Game Design Document (GDD).",
    request_prefix: "Write or improve the GDD for this game idea: ",
    scaffold: &[
        (Persona::GddWriter, "Let's structure the GDD as follows..."),
        (Persona::DesignerA, "We should include..."),
        (Persona::DesignerB, "Don't forget to mention..."),
        (Persona::ProjectManager, "From a project management perspective..."),
    ],
};

/// The concept artist drafting an image prompt.
pub static CONCEPT_ART: StageTemplate = StageTemplate {
    system_prompt: "You are a concept artist creating a prompt for an AI image generator.",
    request_prefix: "Create an image prompt for this game: ",
    scaffold: &[(
        Persona::ConceptArtist,
        "Here's a prompt for the game's key visual...",
    )],
};
