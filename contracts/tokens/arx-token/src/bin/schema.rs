use cosmwasm_schema::write_api;

use sale_types::token::{TokenExecuteMsg, TokenInstantiateMsg, TokenQueryMsg};

fn main() {
    write_api! {
        instantiate: TokenInstantiateMsg,
        execute: TokenExecuteMsg,
        query: TokenQueryMsg,
    }
}
