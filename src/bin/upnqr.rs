use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use upn_qr::encoder::config::default_border;
use upn_qr::encoder::fields::parse_due_date;
use upn_qr::encoder::{QrcodegenEncoder, SymbolOptions};
use upn_qr::render::raster::to_image_scaled;
use upn_qr::render::svg::to_svg;
use upn_qr::render::text::{TextStyle, to_text};
use upn_qr::{MaskPattern, PaymentRecord, Person, QrSymbol, Recipient, encode_record};

#[derive(Parser)]
#[command(name = "upnqr", version, about = "UPN QR payment code generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the encoded UPN record
    Record {
        #[command(flatten)]
        payment: PaymentArgs,
    },
    /// Print the QR symbol as text
    Text {
        #[command(flatten)]
        payment: PaymentArgs,
        #[arg(long)]
        border: Option<i32>,
        /// Draw black modules as blocks (for light terminals)
        #[arg(long)]
        invert: bool,
    },
    /// Write the QR symbol as an SVG document
    Svg {
        #[command(flatten)]
        payment: PaymentArgs,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        border: Option<i32>,
    },
    /// Write the QR symbol as a PNG image
    Png {
        #[command(flatten)]
        payment: PaymentArgs,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        border: Option<i32>,
        /// Pixels per module
        #[arg(long, default_value_t = 1)]
        scale: u32,
    },
}

#[derive(Args)]
struct PaymentArgs {
    #[arg(long)]
    payer_name: String,
    #[arg(long)]
    payer_street: String,
    #[arg(long)]
    payer_city: String,
    #[arg(long)]
    recipient_name: String,
    #[arg(long)]
    recipient_street: String,
    #[arg(long)]
    recipient_city: String,
    /// Recipient account, spaces allowed
    #[arg(long)]
    account: String,
    #[arg(long)]
    amount: f64,
    #[arg(long)]
    purpose_code: String,
    #[arg(long)]
    purpose: String,
    /// YYYY-MM-DD or DD.MM.YYYY
    #[arg(long)]
    due_date: String,
    #[arg(long)]
    reference: String,
    /// Force a mask pattern (0-7)
    #[arg(long)]
    mask: Option<u8>,
}

impl PaymentArgs {
    fn record(&self) -> Result<PaymentRecord> {
        let due_date = parse_due_date(&self.due_date).context("invalid due date")?;
        let record = PaymentRecord::new(
            Person::new(&self.payer_name, &self.payer_street, &self.payer_city),
            Recipient::new(
                Person::new(
                    &self.recipient_name,
                    &self.recipient_street,
                    &self.recipient_city,
                ),
                &self.account,
            ),
            self.amount,
            &self.purpose_code,
            &self.purpose,
            due_date,
            &self.reference,
        )?;
        Ok(record)
    }

    fn symbol(&self) -> Result<QrSymbol> {
        let mut options = SymbolOptions::from_env();
        if let Some(bits) = self.mask {
            let mask = MaskPattern::from_bits(bits)
                .with_context(|| format!("mask must be 0-7, got {bits}"))?;
            options = options.with_mask(mask);
        }
        let record = self.record()?;
        let symbol = upn_qr::make_with_encoder(&record, &QrcodegenEncoder::new(options))?;
        tracing::info!(
            version = symbol.version.number(),
            mask = symbol.mask_pattern.bits(),
            "encoded payment"
        );
        Ok(symbol)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Record { payment } => record_cmd(&payment),
        Command::Text {
            payment,
            border,
            invert,
        } => text_cmd(&payment, border.unwrap_or_else(default_border), invert),
        Command::Svg {
            payment,
            out,
            border,
        } => svg_cmd(&payment, &out, border.unwrap_or_else(default_border)),
        Command::Png {
            payment,
            out,
            border,
            scale,
        } => png_cmd(&payment, &out, border.unwrap_or_else(default_border), scale),
    }
}

fn record_cmd(payment: &PaymentArgs) -> Result<()> {
    let encoded = encode_record(&payment.record()?)?;
    print!("{encoded}");
    Ok(())
}

fn text_cmd(payment: &PaymentArgs, border: i32, invert: bool) -> Result<()> {
    let symbol = payment.symbol()?;
    let style = if invert {
        TextStyle::default().inverted()
    } else {
        TextStyle::default()
    };
    println!("{}", to_text(&symbol, &style, border)?);
    Ok(())
}

fn svg_cmd(payment: &PaymentArgs, out: &Path, border: i32) -> Result<()> {
    let symbol = payment.symbol()?;
    let svg = to_svg(&symbol, border)?;
    std::fs::write(out, svg).with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), "wrote SVG");
    Ok(())
}

fn png_cmd(payment: &PaymentArgs, out: &Path, border: i32, scale: u32) -> Result<()> {
    let symbol = payment.symbol()?;
    let image = to_image_scaled(&symbol, border, scale)?;
    image
        .save(out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    tracing::info!(path = %out.display(), width = image.width(), "wrote PNG");
    Ok(())
}
