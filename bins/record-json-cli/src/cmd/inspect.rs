use record_json::PojoConvertor;

use crate::config::InspectArgs;
use crate::domain::Quote;
use crate::error::CliError;

pub fn run(args: InspectArgs) -> Result<(), CliError> {
    let options = args.options.load()?;
    let convertor = PojoConvertor::<Quote>::with_options(options)?;

    println!("{}", record_json::Convertor::type_name(&convertor));
    println!("  excluded: {}", convertor.excluded_count());
    for getter in convertor.getters() {
        println!("  get {:<12} <- {}", getter.property_name(), getter.method_name());
    }
    for property in convertor.setter_names() {
        let Some(setter) = convertor.setter(property) else {
            continue;
        };
        let kind = setter.number_kind().map_or("-", |k| k.name());
        println!("  set {property:<12} <- {} ({kind})", setter.method_name());
    }
    tracing::debug!(
        getters = convertor.getter_count(),
        setters = convertor.setter_count(),
        "inspected"
    );
    Ok(())
}
