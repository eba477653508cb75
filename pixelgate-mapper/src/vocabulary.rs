//! The shared vendor-neutral event vocabulary.

pub const PAGE_VIEW: &str = "page_view";
pub const VIEW_CONTENT: &str = "view_content";
pub const SEARCH: &str = "search";
pub const ADD_TO_CART: &str = "add_to_cart";
pub const ADD_TO_WISHLIST: &str = "add_to_wishlist";
pub const BEGIN_CHECKOUT: &str = "begin_checkout";
pub const ADD_PAYMENT_INFO: &str = "add_payment_info";
pub const PURCHASE: &str = "purchase";
pub const LEAD: &str = "lead";
pub const SIGN_UP: &str = "sign_up";
pub const SUBSCRIBE: &str = "subscribe";
pub const CONTACT: &str = "contact";

/// Every canonical event name.
pub const CANONICAL_EVENTS: [&str; 12] = [
    PAGE_VIEW,
    VIEW_CONTENT,
    SEARCH,
    ADD_TO_CART,
    ADD_TO_WISHLIST,
    BEGIN_CHECKOUT,
    ADD_PAYMENT_INFO,
    PURCHASE,
    LEAD,
    SIGN_UP,
    SUBSCRIBE,
    CONTACT,
];

