pub mod flashcard_view;
pub mod grammar_view;
pub mod kanji_view;
pub mod menu;
pub mod progress_bar;
pub mod quiz_area;
pub mod result_view;
