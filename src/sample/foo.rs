use serde_json::{Value, json};
use tracing::debug;

use crate::{
    cli::{ArgType, Argument, Arguments, CliError, CommandLineInterface, HandlerResult},
    content::{ContentBinding, ContentSpec, SchemaSource},
    namespace::Namespace,
};

const DEFAULT_XYZ: i64 = 123;

/// Structured content accepted by `foo create`.
pub struct FooSpec;

impl ContentSpec for FooSpec {
    fn description(&self) -> &str {
        "The content contains a specification of the foo resource to create.

        name: name-of-the-resource
        xyz: something-else"
    }

    fn schema(&self) -> SchemaSource {
        SchemaSource::Examples(vec![
            json!({"name": ""}),
            json!({"name": "", "xyz": DEFAULT_XYZ}),
        ])
    }
}

fn create(_args: &Arguments, content: Value, namespace: &mut Namespace) -> HandlerResult {
    println!("Creating a foo with the following specification...");
    print!("{}", serde_yaml::to_string(&content)?);

    let name = content
        .get("name")
        .and_then(Value::as_str)
        .ok_or("foo specification has no name")?;
    let xyz = content
        .get("xyz")
        .cloned()
        .unwrap_or_else(|| Value::from(DEFAULT_XYZ));

    debug!(%name, "Storing foo");
    namespace.insert(name, json!({"type": "foo", "xyz": xyz}));
    Ok(())
}

fn delete(args: &Arguments, namespace: &mut Namespace) -> HandlerResult {
    let name = args.get_str("name").ok_or("missing --name")?;
    println!("Deleting a foo named \"{name}\"");

    namespace
        .remove(name)
        .map(|_| ())
        .ok_or_else(|| format!("no variable named \"{name}\"").into())
}

pub(super) fn load(cli: &mut CommandLineInterface) -> Result<(), CliError> {
    let foos = cli.add_command_group("foo", None)?;
    foos.add_argument(
        Argument::flag("environment")
            .metavar("env")
            .value_type(ArgType::String)
            .help("The name of the environment")
            .default_value("default"),
    );

    foos.add_content_command(
        "create",
        create,
        ContentBinding::from_spec(&FooSpec),
        Some("Creates a foo resource"),
    )?;

    foos.add_command("delete", delete, Some("Deletes a foo resource"))?
        .add_argument(
            Argument::flag("name")
                .metavar("name")
                .required(true)
                .value_type(ArgType::String)
                .help("The name of the resource"),
        );

    Ok(())
}
