use dynamo_item::{
    codec::{decode_get_item_output, decode_put_item, encode_get_item_output, encode_put_item},
    Config, ItemBuilder, RandomTextSource, TextSource,
};
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let config = Config::new();

    let result = match config.seed() {
        Some(seed) => {
            info!("Using seed {seed}");
            dump(&config, RandomTextSource::seeded(seed))
        }
        None => dump(&config, RandomTextSource::new()),
    };

    if let Err(err) = result {
        error!("{:#?}", err);
        std::process::exit(1);
    }
}

fn dump<T: TextSource>(config: &Config, source: T) -> anyhow::Result<()> {
    let mut builder = ItemBuilder::with_source(source)
        .set_string_len(config.string_len())
        .set_binary_len(config.binary_len());

    let mut stdout = io::stdout().lock();
    for fixture in config.fixtures() {
        let item = builder.build(fixture);

        let body = match config.table_name() {
            Some(table_name) => {
                let body = encode_put_item(&table_name, &item);
                anyhow::ensure!(decode_put_item(&body)?.item == item, "{fixture} did not round-trip");
                body
            }
            None => {
                let body = encode_get_item_output(&item);
                anyhow::ensure!(
                    decode_get_item_output(&body)?.as_ref() == Some(&item),
                    "{fixture} did not round-trip"
                );
                body
            }
        };

        info!("{fixture}: {} attributes, {} bytes", item.len(), body.len());
        stdout.write_all(&body)?;
        stdout.write_all(b"\n")?;
    }

    Ok(())
}
