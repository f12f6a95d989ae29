//! Command-line surface of the `partsdesk` binary

use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use partsdesk_domain::{PaymentMethod, ProductInput, SupplierInput};

#[derive(Parser, Debug)]
#[command(name = "partsdesk", version, about = "PartsDesk warehouse administration")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        value_name = "URL",
        help = "Backend base URL (overrides PARTSDESK_API_URL and config files)"
    )]
    pub api_url: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session credential
    Login {
        username: String,
        #[arg(long, env = "PARTSDESK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a seller account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "PARTSDESK_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Forget the stored credential
    Logout,
    /// Show the claims of the stored credential
    Whoami,
    /// Inventory, sales and quote counts
    Dashboard,
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    Suppliers {
        #[command(subcommand)]
        command: SupplierCommands,
    },
    Quotes {
        #[command(subcommand)]
        command: QuoteCommands,
    },
    Sales {
        #[command(subcommand)]
        command: SaleCommands,
    },
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },
}

impl Commands {
    /// Name used in command logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
            Self::Dashboard => "dashboard",
            Self::Products { .. } => "products",
            Self::Suppliers { .. } => "suppliers",
            Self::Quotes { .. } => "quotes",
            Self::Sales { .. } => "sales",
            Self::Users { .. } => "users",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = false, help = "Only products below the low-stock threshold")]
        low_stock: bool,
    },
    Show {
        id: i64,
    },
    Create(ProductFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: ProductFields,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug, Default)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub price: Option<f64>,
    #[arg(long)]
    pub stock: Option<i64>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub supplier: Option<i64>,
}

impl From<ProductFields> for ProductInput {
    fn from(fields: ProductFields) -> Self {
        Self {
            name: fields.name,
            description: fields.description,
            price: fields.price,
            stock: fields.stock,
            category: fields.category,
            supplier_id: fields.supplier,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum SupplierCommands {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: i64,
    },
    Create(SupplierFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: SupplierFields,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug, Default)]
pub struct SupplierFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
}

impl From<SupplierFields> for SupplierInput {
    fn from(fields: SupplierFields) -> Self {
        Self { name: fields.name, phone: fields.phone, email: fields.email, address: fields.address }
    }
}

#[derive(Subcommand, Debug)]
pub enum QuoteCommands {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        email: String,
        /// Line as PRODUCT_ID:QUANTITY, repeatable
        #[arg(long = "item", value_name = "ID:QTY", required = true)]
        items: Vec<LineSpec>,
    },
    Delete {
        id: i64,
    },
    /// Email a quote to its customer
    Email {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum SaleCommands {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, value_enum, default_value_t = PaymentArg::Cash)]
        payment: PaymentArg,
        /// Line as PRODUCT_ID:QUANTITY, repeatable
        #[arg(long = "item", value_name = "ID:QTY", required = true)]
        items: Vec<LineSpec>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, help = "Zero-based page (uses the paginated endpoint)")]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Show {
        id: i64,
    },
    Activate {
        id: i64,
    },
    Deactivate {
        id: i64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PaymentArg {
    Cash,
    Transfer,
    Card,
    Credit,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(value: PaymentArg) -> Self {
        match value {
            PaymentArg::Cash => Self::Cash,
            PaymentArg::Transfer => Self::Transfer,
            PaymentArg::Card => Self::Card,
            PaymentArg::Credit => Self::Credit,
        }
    }
}

/// `--item 12:3` on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineSpec {
    pub product_id: i64,
    pub quantity: i64,
}

impl FromStr for LineSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, qty) = s.split_once(':').unwrap_or((s, "1"));
        let product_id =
            id.trim().parse().map_err(|_| format!("invalid product id in '{s}'"))?;
        let quantity = qty.trim().parse().map_err(|_| format!("invalid quantity in '{s}'"))?;
        if quantity < 1 {
            return Err(format!("quantity must be at least 1 in '{s}'"));
        }
        Ok(Self { product_id, quantity })
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn line_spec_parsing() {
        assert_eq!("7:3".parse(), Ok(LineSpec { product_id: 7, quantity: 3 }));
        assert_eq!("7".parse(), Ok(LineSpec { product_id: 7, quantity: 1 }));
        assert!("7:0".parse::<LineSpec>().is_err());
        assert!("x:2".parse::<LineSpec>().is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "partsdesk",
            "quotes",
            "create",
            "--customer",
            "Ana",
            "--email",
            "ana@example.com",
            "--item",
            "1:2",
            "--item",
            "4:1",
            "--json",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Quotes { command: QuoteCommands::Create { items, .. } } => {
                assert_eq!(items.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
