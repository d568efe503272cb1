use bevy::prelude::*;

/// Sky blue background, #71c5cf
pub const SKY: Color = Color::srgb(0.443, 0.773, 0.812);

/// Pipe body green, #5fa825
pub const PIPE_GREEN: Color = Color::srgb(0.373, 0.659, 0.145);

/// Darker green for the pipe lips, #529320
pub const PIPE_CAP: Color = Color::srgb(0.322, 0.576, 0.125);

/// Sandy ground, #ded895
pub const GROUND: Color = Color::srgb(0.871, 0.847, 0.584);

/// Slightly darker ground stripes, #d1cb8b
pub const GROUND_STRIPE: Color = Color::srgb(0.820, 0.796, 0.545);

/// Yellow bird body
pub const BIRD_BODY: Color = Color::srgb(1.0, 1.0, 0.0);

/// Slightly darker yellow wing, #dada00
pub const BIRD_WING: Color = Color::srgb(0.855, 0.855, 0.0);

/// Orange beak, #ffa500
pub const BIRD_BEAK: Color = Color::srgb(1.0, 0.647, 0.0);

/// White of the eye
pub const EYE_WHITE: Color = Color::WHITE;

/// Black pupil
pub const EYE_PUPIL: Color = Color::BLACK;

/// White score readout
pub const HUD_TEXT: Color = Color::WHITE;

/// White text for overlay headers
pub const HEADER_TEXT: Color = Color::WHITE;

/// White text for overlay labels
pub const LABEL_TEXT: Color = Color::WHITE;
