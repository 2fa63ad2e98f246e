use crate::{
    cli::{Arguments, CliError, CommandLineInterface, HandlerResult},
    namespace::Namespace,
};

fn hello(_args: &Arguments, _namespace: &mut Namespace) -> HandlerResult {
    println!("Hello World!");
    Ok(())
}

pub(super) fn load(cli: &mut CommandLineInterface) -> Result<(), CliError> {
    cli.add_command("hello", hello, Some("Simple top-level command"))?;
    Ok(())
}
