#[cfg(test)]
pub mod test {
    use std::collections::VecDeque;

    use crate::codec::decode;
    use crate::editor::Prompter;
    use crate::error::ParafileError;
    use crate::store::ParamStore;

    /// A parameter file exercising comments, blanks, options, floats, flags
    /// and a malformed line.
    pub const SAMPLE: &str = "\
# Parameters for the sample job

timeout | Timeout | 30 | |
mode | Mode | fast | | fast, slow
// tuning
rate | Learning rate | 0.5 | |
not a data line
verbose | Verbose output | false | flag |
";

    pub const SCENARIO: &str = "\
timeout | Timeout | 30 | |
mode | Mode | fast | | fast, slow
";

    pub fn scenario_store() -> (String, ParamStore) {
        (SCENARIO.to_string(), decode(SCENARIO))
    }

    #[test]
    fn sample_has_four_params() {
        assert_eq!(decode(SAMPLE).len(), 4);
    }

    // -- Scripted console ------------------------------------------------------

    /// Replays canned answers and records everything shown.
    pub struct ScriptedPrompter {
        answers: VecDeque<String>,
        questions: Vec<String>,
        said: Vec<String>,
    }

    impl ScriptedPrompter {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                questions: Vec::new(),
                said: Vec::new(),
            }
        }

        pub fn questions(&self) -> &[String] {
            &self.questions
        }

        pub fn said(&self) -> &[String] {
            &self.said
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, message: &str) -> Result<Option<String>, ParafileError> {
            self.questions.push(message.to_string());
            Ok(self.answers.pop_front())
        }

        fn say(&mut self, message: &str) {
            self.said.push(message.to_string());
        }
    }
}
