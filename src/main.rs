// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::{bail, Context};
use jobscout::config::settings::Settings;
use jobscout::domain::models::job_query::AggregationRequest;
use jobscout::infrastructure::job_archive::JobArchive;
use jobscout::infrastructure::jobs::aggregator::JobAggregator;
use jobscout::infrastructure::storage::create_storage_repository;
use jobscout::utils::telemetry;
use tracing::info;

const USAGE: &str = "usage: jobscout <job title> [location] [max_jobs] [--sample] [--save]";

#[derive(Debug)]
struct CliArgs {
    job_title: String,
    location: Option<String>,
    max_jobs: Option<usize>,
    use_sample: bool,
    save: bool,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<CliArgs> {
    let mut positional = Vec::new();
    let mut use_sample = false;
    let mut save = false;

    for arg in args {
        match arg.as_str() {
            "--sample" => use_sample = true,
            "--save" => save = true,
            "-h" | "--help" => bail!(USAGE),
            flag if flag.starts_with("--") => bail!("unknown flag {}\n{}", flag, USAGE),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let Some(job_title) = positional.next() else {
        bail!(USAGE);
    };
    let location = positional.next();
    let max_jobs = positional
        .next()
        .map(|n| n.parse::<usize>().with_context(|| format!("invalid max_jobs: {}", n)))
        .transpose()?;

    Ok(CliArgs {
        job_title,
        location,
        max_jobs,
        use_sample,
        save,
    })
}

/// 主函数
///
/// 按命令行参数执行一次职位聚合，并以 JSON 输出结果
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_telemetry();

    let args = parse_args(std::env::args().skip(1))?;

    let settings = Settings::new().context("failed to load configuration")?;
    let aggregator = JobAggregator::from_settings(&settings)?;

    let request = AggregationRequest::new(args.job_title.as_str())
        .with_location(
            args.location
                .unwrap_or_else(|| settings.aggregator.default_location.clone()),
        )
        .with_max_jobs(args.max_jobs.unwrap_or(settings.aggregator.default_max_jobs))
        .sample_only(args.use_sample);

    let jobs = aggregator.fetch(&request).await?;
    info!("Found {} jobs", jobs.len());

    println!("{}", serde_json::to_string_pretty(&jobs)?);

    if args.save {
        let archive = JobArchive::new(create_storage_repository(&settings.storage));
        let key = archive.save(&request.job_title, &jobs).await?;
        info!("Saved results under {}/{}", settings.storage.local_path, key);
    }

    Ok(())
}
