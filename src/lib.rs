// Crate entry point. Declares and exposes modules; no business logic here.

pub mod shared {
    pub mod infrastructure {
        pub mod key_value_store;
        pub mod notifier;
    }
}

pub mod modules {
    pub mod cart {
        pub mod core {
            pub mod cart;
            pub mod decision;
            pub mod ports;
            pub mod product;
        }
        pub mod application {
            pub mod cart_manager;
            pub mod errors;
        }
        pub mod use_cases {
            pub mod add_product {
                pub mod decide;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod remove_product {
                pub mod decide;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod update_product_amount {
                pub mod command;
                pub mod decide;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod get_cart {
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod cart_snapshot;
                pub mod http_catalog;
                pub mod in_memory_catalog;
            }
        }
    }
}

pub mod shell;
