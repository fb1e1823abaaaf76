mod command;
mod logging;
mod player;
mod protocol;
mod store;

fn main() -> anyhow::Result<()> {
    command::run()
}
