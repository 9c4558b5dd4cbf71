//! Typed wire packets produced by the dialect encoders.
//!
//! A [`Packet`] is what a [`crate::transport::TransportSink`] delivers. The
//! variants mirror the five scoreboard packets of the protocol family; the
//! field layout inside each variant is chosen by the encoding dialect, so
//! two dialects encoding the same logical operation produce different
//! values. Packets serialize to tagged JSON for sinks that forward them to
//! an out-of-process proxy.

use serde::Serialize;
use serde_json::Value;

/// One encoded scoreboard packet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Packet {
    /// Creates, updates or removes the objective.
    SetObjective(ObjectivePacket),
    /// Binds the objective to a display slot.
    DisplayObjective(DisplayObjectivePacket),
    /// Sets a score, or removes it on dialects without a reset packet.
    SetScore(ScorePacket),
    /// Removes a score.
    ResetScore(ResetScorePacket),
    /// Creates, updates or removes a team.
    SetTeam(TeamPacket),
}

impl Packet {
    /// Short name of the packet kind, used in logs and errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SetObjective(_) => "set_objective",
            Self::DisplayObjective(_) => "display_objective",
            Self::SetScore(_) => "set_score",
            Self::ResetScore(_) => "reset_score",
            Self::SetTeam(_) => "set_team",
        }
    }
}

/// A text field as carried on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WireText {
    /// Legacy `§`-coded string.
    Plain(String),
    /// JSON chat component.
    Component(Value),
}

/// Objective packet mode, sent as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum ObjectiveMode {
    /// `0`
    Create,
    /// `1`
    Remove,
    /// `2`
    Update,
}

impl From<ObjectiveMode> for u8 {
    fn from(mode: ObjectiveMode) -> Self {
        match mode {
            ObjectiveMode::Create => 0,
            ObjectiveMode::Remove => 1,
            ObjectiveMode::Update => 2,
        }
    }
}

/// How the client renders score values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderType {
    /// Plain integers.
    Integer,
}

/// Objective create/update/remove.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectivePacket {
    /// Objective name, which is the board id.
    pub name: String,
    /// Operation.
    pub mode: ObjectiveMode,
    /// Title; absent on removal except for the oldest dialect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<WireText>,
    /// Score render type; absent on the oldest dialect and on removal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_type: Option<RenderType>,
}

/// Display slot reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DisplaySlot {
    /// Numeric slot position.
    Position(u8),
    /// Named slot.
    Named(&'static str),
}

/// Sidebar position on dialects with numeric slots.
pub const SIDEBAR_POSITION: u8 = 1;

/// Sidebar name on dialects with named slots.
pub const SIDEBAR_NAME: &str = "sidebar";

/// Objective display binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayObjectivePacket {
    /// Target slot.
    pub slot: DisplaySlot,
    /// Objective name.
    pub name: String,
}

/// Score action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoreAction {
    /// Set or change the value.
    Change,
    /// Remove the score.
    Remove,
}

impl ScoreAction {
    /// Integer ordinal used by the oldest dialect.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Change => 0,
            Self::Remove => 1,
        }
    }
}

/// Score action as encoded by a given dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionField {
    /// Integer ordinal.
    Ordinal(u8),
    /// Named enum constant.
    Named(ScoreAction),
}

/// How the client renders the value of a single score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NumberFormat {
    /// Render nothing.
    Blank,
    /// Render the given text instead of the number.
    Fixed(WireText),
}

/// Score set (and, on older dialects, removal).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePacket {
    /// Score holder: the row's slot symbol.
    pub owner: String,
    /// Objective name; absent on legacy removals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    /// Action; absent on dialects with a dedicated reset packet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionField>,
    /// Score value; absent on legacy removals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
    /// Per-score label; absent means the default numeric rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_format: Option<NumberFormat>,
}

/// Score removal on dialects with a dedicated packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetScorePacket {
    /// Score holder.
    pub owner: String,
    /// Objective name.
    pub objective: String,
}

/// Team packet mode, sent as its ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
pub enum TeamMode {
    /// `0`
    Create,
    /// `1`
    Remove,
    /// `2`
    Update,
}

impl From<TeamMode> for u8 {
    fn from(mode: TeamMode) -> Self {
        match mode {
            TeamMode::Create => 0,
            TeamMode::Remove => 1,
            TeamMode::Update => 2,
        }
    }
}

/// Visibility and collision value shown to every viewer.
pub const ALWAYS: &str = "always";

/// Colour value for a team without a colour of its own.
pub const COLOR_RESET: &str = "reset";

/// Visible team fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamParameters {
    /// Team display name.
    pub display_name: WireText,
    /// Team colour; only sent by rich-text dialects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    /// Text before the score holder.
    pub prefix: WireText,
    /// Text after the score holder.
    pub suffix: WireText,
    /// Name tag visibility; absent on the oldest dialect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nametag_visibility: Option<&'static str>,
    /// Collision rule; absent on the oldest dialect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collision_rule: Option<&'static str>,
}

/// Placement of the team fields within the packet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TeamBody {
    /// Fields carried directly on the packet.
    Inline(TeamParameters),
    /// Fields carried in an optional parameters block.
    Wrapped {
        /// The wrapped fields.
        parameters: TeamParameters,
    },
}

impl TeamBody {
    /// Team fields regardless of placement.
    #[must_use]
    pub const fn parameters(&self) -> &TeamParameters {
        match self {
            Self::Inline(parameters) | Self::Wrapped { parameters } => parameters,
        }
    }
}

/// Team create/update/remove.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPacket {
    /// Team name, `<board id>:<score>`.
    pub name: String,
    /// Operation.
    pub mode: TeamMode,
    /// Visible fields; absent on removal.
    #[serde(flatten)]
    pub body: Option<TeamBody>,
    /// Members added on creation: the row's slot symbol.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub players: Vec<String>,
}
