use argh::FromArgs;
use std::path::{Path, PathBuf};

use pixgrid::image::{Image, ImageSize};
use pixgrid::imgproc::{ExecutionStrategy, Filter};

#[derive(FromArgs, Debug)]
/// Apply one filter to a bitmap image
struct Args {
    /// convert the image to grayscale
    #[argh(switch, short = 'g')]
    grayscale: bool,

    /// mirror the image horizontally
    #[argh(switch, short = 'r')]
    reflect: bool,

    /// blur the image with a 3x3 box filter
    #[argh(switch, short = 'b')]
    blur: bool,

    /// highlight edges with the Sobel operator
    #[argh(switch, short = 'e')]
    edges: bool,

    /// how rows are scheduled: serial, rows or a thread count
    #[argh(option, default = "ExecutionStrategy::default()")]
    strategy: ExecutionStrategy,

    /// path to the input image
    #[argh(positional)]
    infile: PathBuf,

    /// path to the output image, the format follows the extension
    #[argh(positional)]
    outfile: PathBuf,
}

impl Args {
    /// Pick the single filter requested on the command line.
    fn filter(&self) -> Result<Filter, Box<dyn std::error::Error>> {
        let selected = [
            (self.grayscale, Filter::Grayscale),
            (self.reflect, Filter::Reflect),
            (self.blur, Filter::Blur),
            (self.edges, Filter::Edges),
        ]
        .into_iter()
        .filter_map(|(on, filter)| on.then_some(filter))
        .collect::<Vec<_>>();

        match selected.as_slice() {
            [filter] => Ok(*filter),
            [] => Err("Invalid filter.".into()),
            _ => Err("Only one filter allowed.".into()),
        }
    }
}

fn read_image_rgb8(path: &Path) -> Result<Image<u8, 3>, Box<dyn std::error::Error>> {
    let img = image::open(path)?.into_rgb8();
    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };
    Ok(Image::new(size, img.into_raw())?)
}

fn write_image_rgb8(path: &Path, image: &Image<u8, 3>) -> Result<(), Box<dyn std::error::Error>> {
    let [width, height]: [u32; 2] = image.size().into();
    let buf = image::RgbImage::from_raw(width, height, image.as_slice().to_vec())
        .ok_or("could not create the output buffer")?;
    buf.save(path)?;
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let filter = args.filter()?;

    let mut image = read_image_rgb8(&args.infile)?;
    log::info!(
        "read {} from {}",
        image.size(),
        args.infile.display()
    );

    let start = std::time::Instant::now();
    filter.apply_with(&mut image, args.strategy)?;
    log::info!(
        "applied {filter} with {} in {:?}",
        args.strategy,
        start.elapsed()
    );

    write_image_rgb8(&args.outfile, &image)?;
    log::info!("wrote {}", args.outfile.display());

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();
    run(&args)
}
