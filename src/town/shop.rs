//! Merchant and healer. Both only trade inside a safe location.

use crate::character::Player;
use crate::core::config::BalanceConfig;
use crate::items::catalog::shop_stock;
use crate::items::Item;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    #[error("there is no merchant in {0}")]
    NotInTown(String),
    #[error("{0} is not for sale")]
    NotForSale(String),
    #[error("costs {cost} gold, you have {gold}")]
    NotEnoughGold { cost: u32, gold: u32 },
    #[error("you are not carrying {0}")]
    NotInInventory(String),
    #[error("{0} is equipped")]
    ItemEquipped(String),
    #[error("you are already at full health")]
    AlreadyFullHealth,
}

fn require_town(player: &Player) -> Result<(), ShopError> {
    let location = player.location();
    if location.is_safe() {
        Ok(())
    } else {
        Err(ShopError::NotInTown(location.to_string()))
    }
}

/// Items on the shelf.
pub fn stock() -> Vec<Item> {
    shop_stock()
}

pub fn sell_price(item: &Item, config: &BalanceConfig) -> u32 {
    item.value / config.sell_price_divisor.max(1)
}

/// Buys one copy of a stocked item by name.
pub fn buy(player: &mut Player, name: &str) -> Result<Item, ShopError> {
    require_town(player)?;
    let item = stock()
        .into_iter()
        .find(|item| item.name == name)
        .ok_or_else(|| ShopError::NotForSale(name.to_string()))?;
    if player.gold < item.value {
        return Err(ShopError::NotEnoughGold {
            cost: item.value,
            gold: player.gold,
        });
    }
    player.gold -= item.value;
    player.add_item(item.clone());
    tracing::debug!("{} bought {} for {}g", player.name, item.name, item.value);
    Ok(item)
}

/// Sells one carried copy by name. Returns the gold received. A spare copy
/// of an equipped item may be sold; the worn one may not.
pub fn sell(player: &mut Player, name: &str, config: &BalanceConfig) -> Result<u32, ShopError> {
    require_town(player)?;
    let item = player
        .find_item(name)
        .cloned()
        .ok_or_else(|| ShopError::NotInInventory(name.to_string()))?;
    if player.available_count(name) == 0 {
        return Err(ShopError::ItemEquipped(name.to_string()));
    }
    if !player.consume_items(name, 1) {
        return Err(ShopError::NotInInventory(name.to_string()));
    }
    let price = sell_price(&item, config);
    player.gold = player.gold.saturating_add(price);
    tracing::debug!("{} sold {} for {}g", player.name, item.name, price);
    Ok(price)
}

pub fn healing_cost(player: &Player, config: &BalanceConfig) -> u32 {
    config.healer_cost_per_level.saturating_mul(player.level())
}

/// Restores full health for a fee. Returns the gold paid.
pub fn heal(player: &mut Player, config: &BalanceConfig) -> Result<u32, ShopError> {
    require_town(player)?;
    if player.hp >= player.max_hp() {
        return Err(ShopError::AlreadyFullHealth);
    }
    let cost = healing_cost(player, config);
    if player.gold < cost {
        return Err(ShopError::NotEnoughGold {
            cost,
            gold: player.gold,
        });
    }
    player.gold -= cost;
    player.heal_to_full();
    Ok(cost)
}
