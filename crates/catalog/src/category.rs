//! Category picker: a fixed two-level tree and the dropdown state around it.

/// A top-level category and its subcategories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryNode {
    pub name: &'static str,
    pub children: &'static [&'static str],
}

pub const CATEGORY_TREE: &[CategoryNode] = &[
    CategoryNode {
        name: "Consumer Electronics",
        children: &["Mobile Phone", "Earphones & Headphones", "Smart Watch", "Tablets"],
    },
    CategoryNode {
        name: "Computer & Office",
        children: &[
            "Laptop Computer",
            "Computer Keyboards",
            "Computer Mouse",
            "Computer Storage Devices",
        ],
    },
    CategoryNode {
        name: "Home & Garden",
        children: &["Kitchen Tools", "Home Decor", "Lighting", "Storage & Organization"],
    },
    CategoryNode {
        name: "Beauty & Health",
        children: &[
            "Skin Care",
            "Women's Makeup",
            "Hair Care Products",
            "Health Monitoring Devices",
        ],
    },
    CategoryNode {
        name: "Sports & Entertainment",
        children: &["Cycling", "Camping & Hiking", "Fitness Equipment", "Musical Instruments"],
    },
    CategoryNode {
        name: "Toys & Hobbies",
        children: &["Action Figures", "Building Blocks", "RC Toys", "Educational Toys"],
    },
    CategoryNode {
        name: "Automobiles & Motorcycles",
        children: &["Car Electronics", "Interior Accessories", "Motorcycle Parts"],
    },
    CategoryNode {
        name: "Jewelry & Accessories",
        children: &["Necklaces", "Bracelets", "Rings", "Watches"],
    },
    CategoryNode {
        name: "Bags & Luggage",
        children: &["Backpacks", "Handbags", "Suitcases", "Wallets"],
    },
];

impl CategoryNode {
    /// `"Parent > Child"` path of a subcategory.
    pub fn full_path(&self, child: usize) -> Option<String> {
        self.children
            .get(child)
            .map(|c| format!("{} > {}", self.name, c))
    }
}

/// Dropdown state: open or closed, with at most one category expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMenu {
    open: bool,
    expanded: Option<usize>,
}

impl CategoryMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn expanded(&self) -> Option<&'static CategoryNode> {
        self.expanded.and_then(|i| CATEGORY_TREE.get(i))
    }

    /// Category icon clicked. Opening always starts collapsed.
    pub fn toggle(&mut self) {
        self.open = !self.open;
        self.expanded = None;
    }

    /// Category row clicked: expand it, collapsing any other; clicking the
    /// expanded row collapses it.
    pub fn toggle_category(&mut self, index: usize) {
        if index >= CATEGORY_TREE.len() {
            return;
        }
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// A category row was chosen as the search term. Closes the menu.
    pub fn select_category(&mut self, index: usize) -> Option<&'static str> {
        let name = CATEGORY_TREE.get(index)?.name;
        self.close();
        Some(name)
    }

    /// A subcategory was chosen as the search term. Closes the menu.
    pub fn select_subcategory(&mut self, category: usize, child: usize) -> Option<&'static str> {
        let text = *CATEGORY_TREE.get(category)?.children.get(child)?;
        self.close();
        Some(text)
    }

    /// Click landed outside the menu and its icon.
    pub fn click_outside(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.open = false;
        self.expanded = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_shape() {
        assert_eq!(CATEGORY_TREE.len(), 9);
        assert_eq!(
            CATEGORY_TREE[1].full_path(0).as_deref(),
            Some("Computer & Office > Laptop Computer")
        );
        assert_eq!(CATEGORY_TREE[6].children.len(), 3);
    }

    #[test]
    fn only_one_category_expanded() {
        let mut menu = CategoryMenu::new();
        menu.toggle();
        assert!(menu.is_open());

        menu.toggle_category(2);
        menu.toggle_category(4);
        assert_eq!(menu.expanded().map(|c| c.name), Some("Sports & Entertainment"));

        menu.toggle_category(4);
        assert!(menu.expanded().is_none());
    }

    #[test]
    fn selection_returns_text_and_closes() {
        let mut menu = CategoryMenu::new();
        menu.toggle();
        menu.toggle_category(0);

        assert_eq!(menu.select_subcategory(0, 2), Some("Smart Watch"));
        assert!(!menu.is_open());
        assert!(menu.expanded().is_none());

        menu.toggle();
        assert_eq!(menu.select_subcategory(0, 99), None);
        assert!(menu.is_open());
        menu.click_outside();
        assert!(!menu.is_open());
    }
}
