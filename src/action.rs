use dynojson::Direction;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Action {
    Tick,
    Quit,
    Error(String),
    Status(String),

    Convert,
    SubmitInput(String),
    ShowOutput(String),

    ToggleDirection,
    SetDirection(Direction),

    Paste(String),
    LoadSample,
    ClearInput,

    CopyOutput,
    ScrollOutputUp,
    ScrollOutputDown,
}
