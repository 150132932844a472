use clap::Args;
use luxe_app::{
    database::{self, Db},
    domain::products::{PgProductsService, ProductsService, data::NewProduct},
};

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price in minor currency units
    #[arg(long)]
    price: u64,

    /// Category label
    #[arg(long)]
    category: String,

    /// Image URL
    #[arg(long)]
    image: String,

    /// Optional description
    #[arg(long)]
    description: Option<String>,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,

    /// Feature the product as a best seller
    #[arg(long)]
    hot: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgProductsService::new(Db::new(pool));

    let product = service
        .create_product(NewProduct {
            name: args.name,
            description: args.description,
            price: args.price,
            category: args.category,
            image_url: args.image,
            is_hot: args.hot,
            stock_quantity: args.stock,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    let json = serde_json::to_string_pretty(&product)
        .map_err(|error| format!("failed to encode product: {error}"))?;

    println!("{json}");

    Ok(())
}
