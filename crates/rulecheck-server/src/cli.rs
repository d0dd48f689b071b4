use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "rulecheck", version, about = "HTTP API for rulecheck document/rule verdicts")]
pub(crate) struct Args {
    #[arg(long, default_value = "0.0.0.0:8080")]
    pub(crate) listen_addr: String,
}
