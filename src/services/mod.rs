pub mod completion;
pub mod dispatcher;
pub mod prompts;
pub mod structured;
