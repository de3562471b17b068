//! Read State Example
//!
//! Prints a snapshot of protocol state and, when `LIQUITY_USER_ADDRESS` is set,
//! the positions of that address.
//!
//! ```text
//! LIQUITY_RPC_URL=http://localhost:8545 \
//! LIQUITY_DEPLOYMENT_PATH=deployments/mainnet.json \
//! cargo run --example read_state
//! ```

use liquity_read::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("liquity_read=debug")
        .init();

    let liquity = Liquity::from_env().await?;
    let opts = ReadOptions::default();

    let (price, total, troves, fees) = futures::try_join!(
        liquity.price(&opts),
        liquity.total(&opts),
        liquity.number_of_troves(&opts),
        liquity.fees(&opts),
    )?;

    println!("ETH price:        {:.2}", price);
    println!("Open troves:      {}", troves);
    println!("Total collateral: {:.4} ETH", total.collateral);
    println!("Total debt:       {:.2} LUSD", total.debt);
    println!("Recovery mode:    {}", fees.recovery_mode());
    println!("Borrowing rate:   {}", fees.borrowing_rate(None));

    let riskiest = liquity
        .troves(
            &TroveListingParams::new(5, SortedBy::AscendingCollateralRatio),
            &opts,
        )
        .await?;
    if let Some(resolved) = riskiest.into_resolved() {
        println!("\nLowest collateral ratios:");
        for trove in resolved {
            let ratio = trove
                .trove
                .collateral_ratio(price)
                .map(|r| format!("{:.4}", r))
                .unwrap_or_else(|| "-".to_string());
            println!("  {}  {}", trove.owner, ratio);
        }
    }

    match liquity.resolve_user(None) {
        Ok(user) => {
            let (trove, deposit, stake) = futures::try_join!(
                liquity.trove(Some(user), &opts),
                liquity.stability_deposit(Some(user), &opts),
                liquity.lqty_stake(Some(user), &opts),
            )?;
            println!("\nUser {}", user);
            println!("  Trove:             {:?} {}", trove.status, trove.trove);
            println!("  Stability deposit: {} LUSD", deposit.current_lusd);
            println!("  LQTY staked:       {}", stake.staked_lqty);
        }
        Err(_) => println!("\nSet LIQUITY_USER_ADDRESS to show a user's positions"),
    }

    Ok(())
}
