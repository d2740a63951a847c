use crate::catalog::{Catalog, render};
use crate::command::CommandFactory;
use crate::env::Session;
use crate::io_adapters::LineSource;
use std::io::Write;
use tracing::debug;

pub const MENU_PROMPT: &str =
    "Enter 'a' to add a movie, 'l' to see your movies, 'f' to find a movie, and 'q' to quit: ";
pub const UNKNOWN_COMMAND: &str = "Unknown command - please try again.";

/// Factory allows creating instances of CatalogCommand.
///
/// Only supports commands defined in this crate, see `BuiltinCommand`.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Interactive read-dispatch loop over a single in-memory movie catalog.
///
/// The loop owns a [`Session`] and a list of [`CommandFactory`] objects that
/// are queried to create commands from the first token of each input line.
/// See [`Default`] for the commands included out of the box.
///
/// Example
/// ```
/// use movie_catalog::{BufferedLines, CatalogLoop};
/// use std::io::Cursor;
///
/// let mut input = BufferedLines::new(Cursor::new(b"a\nMatrix\nWachowski\n1999\nq\n".to_vec()));
/// let mut out = Vec::new();
/// let mut catalog = CatalogLoop::default();
/// catalog.menu(&mut input, &mut out).unwrap();
/// assert_eq!(catalog.catalog().len(), 1);
/// ```
pub struct CatalogLoop {
    session: Session,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl CatalogLoop {
    /// Create a loop with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            session: Session::new(),
            commands,
        }
    }

    /// Render catalog output as indented JSON instead of a single line.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.session.pretty = pretty;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.session.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Prompt, read a command line and dispatch it until the session stops.
    ///
    /// End of input counts as quitting. Once stopped the whole catalog is
    /// written to `out`.
    pub fn menu(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> anyhow::Result<()> {
        while self.session.is_running() {
            match input.read_line(MENU_PROMPT, out)? {
                Some(line) => self.dispatch(&line, input, out)?,
                None => {
                    debug!("input ended, stopping");
                    self.session.stop();
                }
            }
        }

        writeln!(out, "{}", render(self.session.catalog.movies(), self.session.pretty)?)?;
        out.flush()?;
        Ok(())
    }

    /// Run one command line against the session.
    ///
    /// The first whitespace-separated token selects the command, the rest are
    /// passed to it as arguments.
    pub fn dispatch(
        &mut self,
        line: &str,
        input: &mut dyn LineSource,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let mut words = line.split_whitespace();
        let Some(token) = words.next() else {
            writeln!(out, "{}", UNKNOWN_COMMAND)?;
            return Ok(());
        };
        let args: Vec<&str> = words.collect();

        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(token, &args) {
                debug!(token, ?args, "dispatch");
                return cmd.execute(input, out, &mut self.session);
            }
        }

        debug!(token, "unknown command");
        writeln!(out, "{}", UNKNOWN_COMMAND)?;
        Ok(())
    }
}

impl Default for CatalogLoop {
    /// Create a loop with the default set of commands:
    /// `a` (add), `l` (list), `f` (find), `q` (quit).
    fn default() -> Self {
        use crate::builtin::*;
        Self::new(vec![
            Box::new(Factory::<AddMovie>::default()),
            Box::new(Factory::<ShowMovies>::default()),
            Box::new(Factory::<FindMovie>::default()),
            Box::new(Factory::<Quit>::default()),
        ])
    }
}

#[cfg(test)]
mod menu_tests {
    use super::*;
    use crate::builtin::{DIRECTOR_PROMPT, NAME_PROMPT, YEAR_PROMPT};
    use crate::catalog::Movie;
    use crate::io_adapters::BufferedLines;
    use std::io::Cursor;

    fn run(script: &str) -> (CatalogLoop, String) {
        run_bytes(script.as_bytes())
    }

    fn run_bytes(script: &[u8]) -> (CatalogLoop, String) {
        let mut catalog = CatalogLoop::default();
        let mut input = BufferedLines::new(Cursor::new(script.to_vec()));
        let mut out = Vec::new();
        catalog.menu(&mut input, &mut out).unwrap();
        (catalog, String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn test_quit_first_prints_empty_catalog() {
        let (catalog, out) = run("q\n");
        assert!(catalog.catalog().is_empty());
        assert!(!catalog.session().is_running());
        assert_eq!(out, format!("{}[]\n", MENU_PROMPT));
    }

    #[test]
    fn test_add_then_list_shows_single_record() {
        let (catalog, out) = run("a\nMatrix\nWachowski\n1999\nl\nq\n");

        assert_eq!(
            catalog.catalog().movies(),
            &[Movie::new("Matrix", "Wachowski", 1999)]
        );

        let record = r#"[{"name":"Matrix","director":"Wachowski","year":1999}]"#;
        let expected = format!(
            "{m}{n}{d}{y}{m}{r}\n{m}{r}\n",
            m = MENU_PROMPT,
            n = NAME_PROMPT,
            d = DIRECTOR_PROMPT,
            y = YEAR_PROMPT,
            r = record,
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_adds_keep_insertion_order() {
        let (catalog, _) = run(
            "a\nAlien\nRidley Scott\n1979\n\
             a\nHeat\nMichael Mann\n1995\n\
             a\nAlien\nRidley Scott\n1979\nq\n",
        );

        let names: Vec<&str> = catalog
            .catalog()
            .movies()
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alien", "Heat", "Alien"]);
    }

    #[test]
    fn test_unknown_command_reprompts_without_mutation() {
        let (catalog, out) = run("x\n\nq\n");

        assert!(catalog.catalog().is_empty());
        let expected = format!(
            "{m}{u}\n{m}{u}\n{m}[]\n",
            m = MENU_PROMPT,
            u = UNKNOWN_COMMAND
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_bad_year_keeps_earlier_records_and_continues() {
        let (catalog, out) = run(
            "a\nMatrix\nWachowski\n1999\n\
             a\nHeat\nMichael Mann\nabc\n\
             q\n",
        );

        assert_eq!(catalog.catalog().len(), 1);
        assert!(out.contains("Invalid year 'abc' - please enter a whole number.\n"));
        assert!(out.ends_with(&format!(
            "{}{}\n",
            MENU_PROMPT, r#"[{"name":"Matrix","director":"Wachowski","year":1999}]"#
        )));
    }

    #[test]
    fn test_end_of_input_acts_as_quit() {
        let (catalog, out) = run("a\nAlien\nRidley Scott\n1979\n");

        assert_eq!(catalog.catalog().len(), 1);
        assert!(!catalog.session().is_running());
        assert!(out.ends_with("1979}]\n"));
    }

    #[test]
    fn test_find_inline_and_prompted() {
        let (_, out) = run(
            "a\nThe Matrix\nWachowski\n1999\n\
             f matrix\n\
             f\nblade\n\
             q\n",
        );

        assert!(out.contains(
            "[{\"name\":\"The Matrix\",\"director\":\"Wachowski\",\"year\":1999}]\n"
        ));
        assert!(out.contains("No movies found matching 'blade'.\n"));
    }

    #[test]
    fn test_non_utf8_name_keeps_session_and_earlier_records() {
        let (catalog, out) = run_bytes(
            b"a\nMatrix\nWachowski\n1999\n\
              a\nAm\xe9lie\nJeunet\n2001\n\
              q\n",
        );

        assert_eq!(catalog.catalog().len(), 2);
        assert_eq!(catalog.catalog().movies()[1].name, "Am\u{FFFD}lie");
        assert!(out.ends_with(&format!(
            "{}{}\n",
            MENU_PROMPT,
            "[{\"name\":\"Matrix\",\"director\":\"Wachowski\",\"year\":1999},\
             {\"name\":\"Am\u{FFFD}lie\",\"director\":\"Jeunet\",\"year\":2001}]"
        )));
    }

    #[test]
    fn test_command_with_extra_words_is_unknown() {
        let (catalog, out) = run("q now\na extra\nq\n");

        assert!(catalog.catalog().is_empty());
        let expected = format!(
            "{m}{u}\n{m}{u}\n{m}[]\n",
            m = MENU_PROMPT,
            u = UNKNOWN_COMMAND
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_large_year_is_accepted() {
        let (catalog, _) = run("a\nFuture\nNobody\n3000000000\nq\n");
        assert_eq!(catalog.catalog().movies()[0].year, 3_000_000_000);
    }

    #[test]
    fn test_command_token_is_trimmed() {
        let (catalog, _) = run("  q  \n");
        assert!(!catalog.session().is_running());
    }

    #[test]
    fn test_pretty_rendering_on_quit() {
        let mut catalog = CatalogLoop::default().with_pretty(true);
        let mut input = BufferedLines::new(Cursor::new(b"a\nHeat\nMichael Mann\n1995\nq\n".to_vec()));
        let mut out = Vec::new();
        catalog.menu(&mut input, &mut out).unwrap();

        let s = String::from_utf8(out).unwrap();
        assert!(s.ends_with("  {\n    \"name\": \"Heat\",\n    \"director\": \"Michael Mann\",\n    \"year\": 1995\n  }\n]\n"));
    }

    #[test]
    fn test_custom_factories_limit_commands() {
        let factories: Vec<Box<dyn CommandFactory>> =
            vec![Box::new(Factory::<crate::builtin::Quit>::default())];
        let mut catalog = CatalogLoop::new(factories);

        let mut input = BufferedLines::new(Cursor::new(b"l\nq\n".to_vec()));
        let mut out = Vec::new();
        catalog.menu(&mut input, &mut out).unwrap();

        let s = String::from_utf8(out).unwrap();
        assert!(s.contains(UNKNOWN_COMMAND));
    }
}
