pub mod images;
pub mod labels;
pub mod participants;

pub use images::ImageRow;
pub use labels::LabelRow;
pub use participants::ParticipantRow;
