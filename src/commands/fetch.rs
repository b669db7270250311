use crate::controllers::snippet;
use crate::App;

#[derive(Debug, clap::Args)]
pub struct Args {
    code: String,
    #[arg(short, long)]
    password: Option<String>,
}

pub async fn run(mut app: App, args: Args) -> anyhow::Result<()> {
    let snippet = snippet::retrieve(&mut app.store, &args.code, args.password.as_deref()).await?;
    print!("{}", snippet.content);
    if !snippet.content.ends_with('\n') {
        println!();
    }
    Ok(())
}
