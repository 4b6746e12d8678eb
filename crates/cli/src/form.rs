//! Interactive book form.
//!
//! The form keeps its values between predictions, so the user can tweak one
//! field and predict again. A prediction only runs on the explicit Predict
//! action; editing fields never triggers one.

use crate::render;
use colored::Colorize;
use pipeline::{BookInput, GenreOptions, InputError, Predictor};
use std::io::{self, BufRead, Write};
use tracing::debug;

/// What the user asked for at the action prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Predict,
    Edit,
    Info,
    Quit,
}

impl Action {
    fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "p" | "predict" => Some(Action::Predict),
            "e" | "edit" => Some(Action::Edit),
            "i" | "info" => Some(Action::Info),
            "q" | "quit" | "exit" => Some(Action::Quit),
            _ => None,
        }
    }
}

pub struct Form<'a, R, W> {
    predictor: &'a Predictor,
    options: GenreOptions,
    state: BookInput,
    input: R,
    out: W,
}

impl<'a, R: BufRead, W: Write> Form<'a, R, W> {
    pub fn new(predictor: &'a Predictor, input: R, out: W) -> Self {
        let options = GenreOptions::from_artifacts(Some(predictor.artifacts()));
        let state = options.default_input();
        Self {
            predictor,
            options,
            state,
            input,
            out,
        }
    }

    /// Current form values
    pub fn state(&self) -> &BookInput {
        &self.state
    }

    /// Run until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "Book Information".bold())?;
        if !self.edit_fields()? {
            return Ok(());
        }

        loop {
            let Some(answer) = self.ask("[p]redict, [e]dit, [i]nfo, [q]uit")? else {
                return Ok(());
            };
            match Action::parse(&answer) {
                Some(Action::Predict) => {
                    let result = self.predictor.predict(&self.state);
                    render::prediction(&mut self.out, &result)?;
                }
                Some(Action::Edit) => {
                    if !self.edit_fields()? {
                        return Ok(());
                    }
                }
                Some(Action::Info) => {
                    let info = self.predictor.artifacts().info();
                    render::model_info(&mut self.out, &info, &self.options)?;
                }
                Some(Action::Quit) => return Ok(()),
                None if answer.is_empty() => {}
                None => writeln!(self.out, "Unknown action {:?}", answer.trim())?,
            }
        }
    }

    /// Walk through every field. Returns false if input ended.
    fn edit_fields(&mut self) -> io::Result<bool> {
        loop {
            let current = self.state.price();
            let Some(answer) = self.ask(&format!("Price ($) [{:.2}]", current))? else {
                return Ok(false);
            };
            match parse_or_keep(&answer, current) {
                Some(price) => match self.rebuild(|s| BookInput::new(price, s.rating(), s.review_count(), s.main_genre(), s.sub_genre())) {
                    Ok(()) => break,
                    Err(e) => render::input_error(&mut self.out, &e)?,
                },
                None => writeln!(self.out, "Enter a price such as 9.99")?,
            }
        }

        loop {
            let current = self.state.rating();
            let Some(answer) = self.ask(&format!("Average Rating (0.0-5.0) [{:.1}]", current))? else {
                return Ok(false);
            };
            match parse_or_keep(&answer, current) {
                Some(rating) => match self.rebuild(|s| BookInput::new(s.price(), rating, s.review_count(), s.main_genre(), s.sub_genre())) {
                    Ok(()) => break,
                    Err(e) => render::input_error(&mut self.out, &e)?,
                },
                None => writeln!(self.out, "Enter a rating such as 4.5")?,
            }
        }

        loop {
            let current = self.state.review_count();
            let Some(answer) = self.ask(&format!("Number of People Rated [{}]", current))? else {
                return Ok(false);
            };
            match parse_or_keep::<u32>(&answer, current) {
                Some(count) => {
                    self.rebuild(|s| BookInput::new(s.price(), s.rating(), count, s.main_genre(), s.sub_genre()))
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                    break;
                }
                None => writeln!(self.out, "Enter a whole number of ratings, 0 or more")?,
            }
        }

        let main_options = self.options.main.clone();
        let Some(main) = self.choose("Main Genre", &main_options, self.state.main_genre().to_string())? else {
            return Ok(false);
        };
        let sub_options = self.options.sub.clone();
        let Some(sub) = self.choose("Sub Genre", &sub_options, self.state.sub_genre().to_string())? else {
            return Ok(false);
        };
        self.state = BookInput::new(
            self.state.price(),
            self.state.rating(),
            self.state.review_count(),
            main,
            sub,
        )
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        debug!("Form values: {:?}", self.state);
        Ok(true)
    }

    /// Replace the state if the new values validate.
    fn rebuild(
        &mut self,
        build: impl FnOnce(&BookInput) -> Result<BookInput, InputError>,
    ) -> Result<(), InputError> {
        self.state = build(&self.state)?;
        Ok(())
    }

    /// Pick one option by list number or exact name. `None` on end of input.
    fn choose(&mut self, label: &str, options: &[String], current: String) -> io::Result<Option<String>> {
        writeln!(self.out, "{}:", label)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.out, "  {:>2}) {}", i + 1, option)?;
        }

        loop {
            let Some(answer) = self.ask(&format!("Choose {} [{}]", label.to_lowercase(), current))? else {
                return Ok(None);
            };
            if let Some(choice) = match_option(&answer, options, &current) {
                return Ok(Some(choice));
            }
            writeln!(self.out, "Enter a number between 1 and {} or a genre name", options.len())?;
        }
    }

    /// Print a prompt and read one line. `None` on end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{}: ", prompt)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Parse an answer; an empty answer keeps the current value.
fn parse_or_keep<T: std::str::FromStr>(answer: &str, current: T) -> Option<T> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(current);
    }
    answer.parse().ok()
}

fn match_option(answer: &str, options: &[String], current: &str) -> Option<String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Some(current.to_string());
    }
    if let Ok(n) = answer.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| options.get(i)).cloned();
    }
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(answer))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use artifacts::{ArtifactPaths, ArtifactSet};
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    fn sample_predictor() -> Predictor {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../artifacts");
        let set = ArtifactSet::load_from_paths(&ArtifactPaths::in_dir(&dir)).unwrap();
        Predictor::new(Arc::new(set))
    }

    fn run_form(predictor: &Predictor, script: &str) -> (BookInput, String) {
        colored::control::set_override(false);
        let mut out = Vec::new();
        let state = {
            let mut form = Form::new(predictor, Cursor::new(script.to_string()), &mut out);
            form.run().unwrap();
            form.state().clone()
        };
        (state, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_or_keep() {
        assert_eq!(parse_or_keep("", 9.99), Some(9.99));
        assert_eq!(parse_or_keep(" 12.5 ", 9.99), Some(12.5));
        assert_eq!(parse_or_keep("abc", 9.99), None);
        assert_eq!(parse_or_keep::<u32>("-10", 100), None);
    }

    #[test]
    fn test_match_option() {
        let options = vec!["Literature & Fiction".to_string(), "Sports".to_string()];
        assert_eq!(match_option("2", &options, "Sports"), Some("Sports".to_string()));
        assert_eq!(match_option("sports", &options, "x"), Some("Sports".to_string()));
        assert_eq!(match_option("", &options, "Sports"), Some("Sports".to_string()));
        assert_eq!(match_option("0", &options, "Sports"), None);
        assert_eq!(match_option("3", &options, "Sports"), None);
        assert_eq!(match_option("Cookbooks", &options, "Sports"), None);
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("p"), Some(Action::Predict));
        assert_eq!(Action::parse(""), None);
        assert_eq!(Action::parse("Q"), Some(Action::Quit));
        assert_eq!(Action::parse("x"), None);
    }

    #[test]
    fn test_defaults_and_predict() {
        let predictor = sample_predictor();
        // keep every default, choose genres 6 and 8, predict, quit
        let (state, output) = run_form(&predictor, "\n\n\n6\n8\np\nq\n");

        assert_eq!(state.price(), 9.99);
        assert_eq!(state.rating(), 4.0);
        assert_eq!(state.review_count(), 100);
        assert_eq!(state.main_genre(), "Literature & Fiction");
        assert_eq!(state.sub_genre(), "Romance");
        assert!(output.contains("Prediction Complete!"));
        assert!(output.contains("NOT to be a bestseller"));
    }

    #[test]
    fn test_invalid_values_are_reprompted() {
        let predictor = sample_predictor();
        let script = "-5\nabc\n12\n7\n4.7\nlots\n5000\nLiterature & Fiction\n99\nRomance\np\nq\n";
        let (state, output) = run_form(&predictor, script);

        assert!(output.contains("Price must be a non-negative number"));
        assert!(output.contains("Rating must be between 0.0 and 5.0"));
        assert!(output.contains("Enter a whole number"));
        assert!(output.contains("Enter a number between 1 and 10"));
        assert_eq!(state.price(), 12.0);
        assert_eq!(state.rating(), 4.7);
        assert_eq!(state.review_count(), 5000);
        assert!(output.contains("predicted to be a BESTSELLER!"));
        assert!(output.contains("Bestseller Probability"));
    }

    #[test]
    fn test_no_prediction_without_predict_action() {
        let predictor = sample_predictor();
        let (_, output) = run_form(&predictor, "\n\n\n\n\ni\nq\n");

        assert!(output.contains("Model Type: RandomForestClassifier"));
        assert!(!output.contains("Prediction Complete!"));
    }

    #[test]
    fn test_blank_action_does_not_predict() {
        let predictor = sample_predictor();
        let (_, output) = run_form(&predictor, "\n\n\n\n\n\nq\n");

        // blank answer re-prompts
        assert_eq!(output.matches("[p]redict").count(), 2);
        assert!(!output.contains("Unknown action"));
        assert!(!output.contains("Prediction Complete!"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let predictor = sample_predictor();
        let (state, output) = run_form(&predictor, "15\n");

        assert_eq!(state.price(), 15.0);
        assert!(!output.contains("Prediction Complete!"));
    }
}
