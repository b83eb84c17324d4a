//! Core dashboard building blocks: geometry, input decoding, editing,
//! history wrapping, status composition, and the typed output gate.

pub mod editor;
pub mod geometry;
pub mod history;
pub mod input;
pub mod output;
pub mod status;
pub mod terminal;
pub mod text;
