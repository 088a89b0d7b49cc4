mod command;
mod store;
mod util;
mod view;

fn main() -> anyhow::Result<()> {
    command::run()
}
