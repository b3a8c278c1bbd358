pub mod feature;
pub mod form;
pub mod history;
pub mod prediction;
