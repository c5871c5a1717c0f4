use clap::{Arg, ArgAction, ArgMatches, Command};
use lmnd_cli::export::{write_results, ResultsDocument};
use lmnd_cli::solve::HighsBackend;
use lmnd_cli::{Instance, InstanceConfig, ScenarioSelection};
use lmnd_core::solver::{CapacityMode, ParamValue};
use lmnd_core::utils::{Environment, ModelError, ModelResult};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process;
use std::sync::Arc;

const DATA_DIR_ARG_NAME: &str = "DATA_DIR";
const INSTANCE_ARG_NAME: &str = "instance";
const PERIODS_ARG_NAME: &str = "periods";
const SCENARIOS_ARG_NAME: &str = "scenarios";
const MODE_ARG_NAME: &str = "capacity-mode";
const CONTINUOUS_ARG_NAME: &str = "continuous-assignment";
const TIME_ARG_NAME: &str = "max-time";
const SAMPLING_ARG_NAME: &str = "sampling";
const OUT_RESULT_ARG_NAME: &str = "out-result";

fn get_arg_matches() -> ArgMatches {
    Command::new("Last-Mile Network Design Solver")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Designs a stochastic two-echelon last-mile delivery network")
        .arg(Arg::new(DATA_DIR_ARG_NAME).help("Sets the data directory to use").required(true).index(1))
        .arg(
            Arg::new(INSTANCE_ARG_NAME)
                .help("Specifies the instance id used in the result document")
                .long(INSTANCE_ARG_NAME)
                .default_value("1"),
        )
        .arg(
            Arg::new(PERIODS_ARG_NAME)
                .help("Specifies the amount of planning periods")
                .short('p')
                .long(PERIODS_ARG_NAME)
                .value_parser(clap::value_parser!(usize))
                .default_value("12"),
        )
        .arg(
            Arg::new(SCENARIOS_ARG_NAME)
                .help("Specifies the amount of scenarios under the default selection")
                .short('n')
                .long(SCENARIOS_ARG_NAME)
                .value_parser(clap::value_parser!(usize))
                .default_value("1"),
        )
        .arg(
            Arg::new(MODE_ARG_NAME)
                .help("Specifies the capacity planning mode")
                .short('m')
                .long(MODE_ARG_NAME)
                .value_parser(["fixed-capacity", "flex-capacity"])
                .default_value("fixed-capacity"),
        )
        .arg(
            Arg::new(CONTINUOUS_ARG_NAME)
                .help("Relaxes assignment variables to the unit interval")
                .long(CONTINUOUS_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(TIME_ARG_NAME)
                .help("Specifies max solver run time in seconds")
                .short('t')
                .long(TIME_ARG_NAME)
                .value_parser(clap::value_parser!(i64)),
        )
        .arg(
            Arg::new(SAMPLING_ARG_NAME)
                .help("Specifies the scenario sample: 'evaluation' or a numbered sampling plan id")
                .long(SAMPLING_ARG_NAME),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies the path of the result document")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .default_value("results.json"),
        )
        .get_matches()
}

fn main() {
    if let Err(err) = run(get_arg_matches()) {
        eprintln!("{err}");
        process::exit(1);
    }
}

fn run(matches: ArgMatches) -> ModelResult<()> {
    let environment = Arc::new(Environment::default());

    let selection = match matches.get_one::<String>(SAMPLING_ARG_NAME) {
        None => ScenarioSelection::FirstN,
        Some(value) if value == "evaluation" => ScenarioSelection::Evaluation,
        Some(value) => {
            let plan_id = value.parse().map_err(|_| {
                ModelError::InvalidConfiguration(format!("invalid sampling selection '{value}'"))
            })?;
            ScenarioSelection::Plan(plan_id)
        }
    };

    let config = InstanceConfig {
        periods: *matches.get_one::<usize>(PERIODS_ARG_NAME).expect("has default"),
        scenario_count: *matches.get_one::<usize>(SCENARIOS_ARG_NAME).expect("has default"),
        capacity_mode: CapacityMode::parse(matches.get_one::<String>(MODE_ARG_NAME).expect("has default"))?,
        continuous_assignment: matches.get_flag(CONTINUOUS_ARG_NAME),
        selection,
    };

    let data_dir = Path::new(matches.get_one::<String>(DATA_DIR_ARG_NAME).expect("required"));
    let instance_id = matches.get_one::<String>(INSTANCE_ARG_NAME).expect("has default");

    let instance = Instance::load(data_dir, instance_id, config, environment.clone())?;

    let mut model = instance.create_model(Box::<HighsBackend>::default())?;
    model.build()?;

    if let Some(&max_time) = matches.get_one::<i64>(TIME_ARG_NAME) {
        model.set_params(&[("TimeLimit".to_string(), ParamValue::Integer(max_time))])?;
    }

    let report = model.solve()?;
    let document = ResultsDocument::new(&instance, &report, model.variable_values()?);

    let out_path = matches.get_one::<String>(OUT_RESULT_ARG_NAME).expect("has default");
    let file = File::create(out_path)
        .map_err(|err| ModelError::InvalidData(format!("cannot create {out_path}: {err}")))?;
    write_results(BufWriter::new(file), &document)?;

    (environment.logger)(&format!("results saved in {out_path}"));

    Ok(())
}
