use argh::FromArgs;
use movie_catalog::logger::init_logger;
use movie_catalog::{BufferedLines, CatalogLoop, Readline};

#[derive(FromArgs)]
/// Keep track of the movies you have seen.
struct Args {
    #[argh(switch, short = 'v')]
    /// enable debug logging on stderr.
    verbose: bool,

    #[argh(switch, short = 'p')]
    /// print the catalog as indented JSON.
    pretty: bool,

    #[argh(switch)]
    /// read plain lines from stdin instead of the interactive line editor.
    plain: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();
    init_logger(args.verbose);

    let mut catalog = CatalogLoop::default().with_pretty(args.pretty);
    let mut stdout = std::io::stdout();

    if args.plain {
        let mut input = BufferedLines::new(std::io::stdin().lock());
        catalog.menu(&mut input, &mut stdout)?;
    } else {
        let mut input = Readline::new()?;
        catalog.menu(&mut input, &mut stdout)?;
    }

    tracing::debug!(movies = catalog.catalog().len(), "catalog closed");
    Ok(())
}
