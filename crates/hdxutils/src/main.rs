//! hdx CLI entry point.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use hdxutils::api::ApiManager;
use hdxutils::cli::{log_filter, Cli, Commands, OutputFormat};
use hdxutils::datalake::DatalakeManager;
use hdxutils::dynamodb::DynamoDbManager;
use hdxutils::lambda::LambdaManager;
use hdxutils::output::{format_output, pretty, render};
use hdxutils::s3::S3Manager;
use hdxutils::secrets::{SecretCache, SecretsManager};
use hdxutils::{session, Config};
use hdxutils_core::dynamodb::{decode_json, encode};
use hdxutils_core::lambda::ClientContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter(&cli.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config {
        region: cli.region.clone(),
        ..Config::from_env()
    };
    let sdk_config = session::load_sdk_config(&config.aws()).await;
    let format = cli.format;

    let secrets = || {
        SecretsManager::from_conf(&sdk_config, config.region.clone()).with_cache(SecretCache::new(
            config.secrets_cache_max_entries,
            config.secrets_cache_ttl(),
        ))
    };

    match cli.command {
        Commands::Dynamo(dynamo_cmd) => {
            use hdxutils::cli::dynamo::DynamoAction;
            let dynamo = || DynamoDbManager::from_conf(&sdk_config);
            match dynamo_cmd.action {
                DynamoAction::Get { table, key } => match dynamo().get_item(&table, &key).await? {
                    Some(record) => println!("{}", render(&record, format, pretty::format_record)),
                    None => eprintln!("No item found in {}", table),
                },
                DynamoAction::Put { table, item } => {
                    dynamo().put_item(&table, &item).await?;
                    println!("Put item into {}", table);
                }
                DynamoAction::Delete { table, key } => {
                    dynamo().delete_item(&table, &key).await?;
                    println!("Deleted item from {}", table);
                }
                DynamoAction::Scan { table, limit } => {
                    let items = dynamo()
                        .scan(&table, |builder| builder.set_limit(limit))
                        .await?;
                    println!("{}", render(&items, format, pretty::format_items));
                }
                DynamoAction::Pql { statement, limit } => {
                    let items = dynamo()
                        .pql_query(&statement, limit.unwrap_or(config.pql_limit))
                        .await?;
                    println!("{}", render(&items, format, pretty::format_items));
                }
                DynamoAction::Encode { item } => {
                    println!("{}", format_output(&encode(&item), format));
                }
                DynamoAction::Decode { item } => {
                    let record = decode_json(&item)?;
                    println!("{}", render(&record, format, pretty::format_record));
                }
            }
        }
        Commands::S3(s3_cmd) => {
            use hdxutils::cli::s3::S3Action;
            let s3 = S3Manager::from_conf(&sdk_config);
            match s3_cmd.action {
                S3Action::Ls { bucket, prefix } => {
                    let objects = s3.list_files(&bucket, &prefix).await?;
                    println!("{}", render(objects.as_slice(), format, pretty::format_objects));
                }
                S3Action::Exists { bucket, key } => {
                    let exists = s3.file_exists(&bucket, &key).await?;
                    println!("{}", format_output(&exists, format));
                }
                S3Action::Json { bucket, key } => {
                    let value = s3.read_json(&bucket, &key).await?;
                    println!("{}", format_output(&value, format));
                }
                S3Action::Csv {
                    bucket,
                    key,
                    delimiter,
                } => {
                    let delimiter = u8::try_from(delimiter)
                        .map_err(|_| anyhow::anyhow!("delimiter must be a single-byte character"))?;
                    let frame = s3.read_csv(&bucket, &key, delimiter).await?;
                    match format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&frame.to_records(), format))
                        }
                        OutputFormat::Pretty => println!("{}", pretty::format_frame(&frame)),
                    }
                }
                S3Action::Excel {
                    bucket,
                    key,
                    sheet: None,
                    ..
                } => {
                    let sheets = s3.read_excel(&bucket, &key).await?;
                    println!("{}", format_output(&sheets, format));
                }
                S3Action::Excel {
                    bucket,
                    key,
                    sheet: Some(sheet),
                    skip_header,
                    columns,
                } => {
                    let frame = s3
                        .read_excel_sheet(&bucket, &key, &sheet, skip_header, columns)
                        .await?;
                    match format {
                        OutputFormat::Json => {
                            println!("{}", format_output(&frame.to_records(), format))
                        }
                        OutputFormat::Pretty => println!("{}", pretty::format_frame(&frame)),
                    }
                }
                S3Action::Url {
                    bucket,
                    key,
                    expires,
                } => {
                    let expires = expires
                        .map(Duration::from_secs)
                        .unwrap_or_else(|| config.presign_expires());
                    println!("{}", s3.download_url(&bucket, &key, expires).await?);
                }
                S3Action::Upload { bucket, path, key } => {
                    s3.upload_file(&bucket, &path, &key).await?;
                    println!("Uploaded {} to s3://{}/{}", path.display(), bucket, key);
                }
            }
        }
        Commands::Secrets(secrets_cmd) => {
            use hdxutils::cli::secrets::SecretsAction;
            match secrets_cmd.action {
                SecretsAction::Get { name } => {
                    let secret = secrets().get_secret(&name).await?;
                    println!("{}", format_output(&secret, format));
                }
            }
        }
        Commands::Lambda(lambda_cmd) => {
            use hdxutils::cli::lambda::LambdaAction;
            let LambdaAction::Invoke {
                function,
                params,
                custom,
                env,
                asynchronous,
            } = lambda_cmd.action;

            let context = ClientContext {
                custom,
                env,
                client: None,
            };
            let response = LambdaManager::from_conf(&sdk_config)
                .invoke(&function, params.as_ref(), &context, asynchronous)
                .await?;
            println!("{}", format_output(&response, format));
        }
        Commands::Query(query_cmd) => {
            let datalake = DatalakeManager::from_secret(
                &sdk_config,
                &secrets(),
                &query_cmd.secret,
                &query_cmd.staging_dir,
                &config.region,
            )
            .await?
            .with_poll_interval(config.athena_poll_interval());

            let frame = datalake.query(&query_cmd.sql).await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&frame.to_records(), format)),
                OutputFormat::Pretty => println!("{}", pretty::format_frame(&frame)),
            }
        }
        Commands::Api(api_cmd) => {
            use hdxutils::cli::api::ApiAction;
            let ApiAction::Call {
                module,
                method,
                params,
                secret,
            } = api_cmd.action;

            let api = ApiManager::from_secret(&secrets(), &secret).await?;
            let response = api.call(&module, &method, &params).await?;
            println!("{}", format_output(&response, format));
        }
    }

    Ok(())
}
