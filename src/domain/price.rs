/// Cost amount of a subscription, stored in a 32-bit INTEGER column.
#[derive(Debug, Clone, Copy)]
pub struct Price(i32);

impl Price {
    /// A zero price counts as a missing one.
    pub fn parse(price: i64) -> Result<Price, String> {
        if price == 0 {
            return Err(String::from("price is required"));
        }

        if price < 0 {
            return Err(format!("{} is not a valid price: it cannot be negative", price));
        }

        i32::try_from(price)
            .map(Self)
            .map_err(|_| format!("{} is not a valid price: it is too large", price))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
