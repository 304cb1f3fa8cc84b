//! an executable computing approximate graph edit distance matrices
//! example usage:
//! gedmatrix --graphs "Data/mutag/graphs" --embeddings "Data/mutag/embeddings" --strategy exact
//! gedmatrix --graphs "Data/mutag/graphs" --embeddings "Data/mutag/embeddings" --output mutag_cross --strategy greedy cross --test test.csv --train train.csv
//!
//!  graphs are files graph_<k>.graphml, embeddings are files embedding_<k>.csv with one vector per node.
//!  strategy is exact (optimal assignment), greedy or greedy-fast.
//!  Without subcommand the full distance matrix of the collection is computed, with cross subcommand
//!  the matrix between test and train graph indexes.
//!  The matrix is dumped in csv, default file distances.csv


use anyhow::anyhow;
use clap::{arg, Arg, ArgMatches, Command};

use std::path::Path;
use std::time::SystemTime;

use cpu_time::ProcessTime;

use graphged::prelude::*;


fn parse_params(matches: &ArgMatches) -> Result<PipelineParams, anyhow::Error> {
    log::debug!("in parse_params");
    //
    let strategy = match matches.value_of("strategy") {
        Some(str) => str.parse::<AssignmentStrategy>()?,
        None => AssignmentStrategy::default(),
    };
    let symmetry = match matches.value_of("symmetry") {
        Some(str) => str.parse::<SymmetryMode>()?,
        None => SymmetryMode::default(),
    };
    let on_error = match matches.value_of("sentinel") {
        Some(str) => {
            let res = str.parse::<i64>();
            match res {
                Ok(val) => ErrorPolicy::Sentinel(val),
                _ => {
                    return Err(anyhow!("could not parse sentinel value {}", str));
                }
            }
        }
        None => ErrorPolicy::Abort,
    };
    let parallel = !matches.is_present("serial");
    //
    Ok(PipelineParams::new(strategy, parallel, symmetry, on_error))
} // end of parse_params


fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let graph_dir = matches.value_of("graphs").ok_or_else(|| anyhow!("graphs directory required"))?;
    let embedding_dir = matches.value_of("embeddings").ok_or_else(|| anyhow!("embeddings directory required"))?;
    log::info!("graphs directory : {:?}, embeddings directory : {:?}", graph_dir, embedding_dir);
    let params = parse_params(matches)?;
    log::info!("pipeline params : {:?}", params);
    let output = Output::new(Format::CSV, &matches.value_of("output").map(String::from));
    //
    let (graphs, embeddings) = load_dataset::<f64>(Path::new(graph_dir), Path::new(embedding_dir))?;
    let pipeline = DistanceMatrixPipeline::new(&graphs, &embeddings, params)?;
    //
    let cpu_start = ProcessTime::now();
    let sys_now = SystemTime::now();
    let matrix = match matches.subcommand() {
        Some(("cross", sub_m)) => {
            log::debug!("got cross mode");
            let test_file = sub_m.value_of("test").ok_or_else(|| anyhow!("test index file required"))?;
            let train_file = sub_m.value_of("train").ok_or_else(|| anyhow!("train index file required"))?;
            let test = read_indices(Path::new(test_file))?;
            let train = read_indices(Path::new(train_file))?;
            pipeline.cross_matrix(&test, &train)?
        }
        _ => pipeline.full_matrix()?,
    };
    log::info!(
        "gedmatrix : distance matrix {:?} computed, sys time(ms) {:?} cpu time(ms) {:?}",
        matrix.dim(),
        sys_now.elapsed()?.as_millis(),
        cpu_start.elapsed().as_millis()
    );
    //
    dump_matrix(&matrix, Path::new(output.get_output_name()))?;
    Ok(())
} // end of run


pub fn main() {
    //
    graphged::log_init();
    log::info!("logger initialized");
    //
    let matches = Command::new("gedmatrix")
        .arg_required_else_help(true)
        .arg(Arg::new("graphs")
            .long("graphs")
            .takes_value(true)
            .required(true)
            .help("directory of graph_<k>.graphml files"))
        .arg(Arg::new("embeddings")
            .long("embeddings")
            .takes_value(true)
            .required(true)
            .help("directory of embedding_<k>.csv files"))
        .arg(Arg::new("output")
            .long("output")
            .short('o')
            .takes_value(true)
            .required(false)
            .help("name of csv output, default distances.csv"))
        .arg(Arg::new("strategy")
            .long("strategy")
            .takes_value(true)
            .required(false)
            .help("specify \"exact\", \"greedy\" or \"greedy-fast\", default exact"))
        .arg(Arg::new("symmetry")
            .long("symmetry")
            .takes_value(true)
            .required(false)
            .help("\"mirror\" (default) or \"independent\" for full matrix"))
        .arg(Arg::new("sentinel")
            .long("sentinel")
            .takes_value(true)
            .required(false)
            .allow_hyphen_values(true)
            .help("value stored for failed pairs, default aborts on first failure"))
        .arg(Arg::new("serial")
            .long("serial")
            .help("disable multithreading"))
        .subcommand(Command::new("cross")
            .arg_required_else_help(true)
            .args(&[
                arg!(--test <test> "csv file of test graph indexes"),
                arg!(--train <train> "csv file of train graph indexes"),
            ])
        )
    .get_matches();
    //
    if let Err(e) = run(&matches) {
        log::error!("gedmatrix failed : {:?}", e);
        std::process::exit(1);
    }
} // end of main
