//! Abstractions for page-number pagination.

use std::{cmp::Ordering, num::NonZeroUsize};

use derive_more::{Display, Error};

/// Arguments selecting a single [`Page`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// Requested 1-based page number.
    page: NonZeroUsize,

    /// Maximum number of items on a [`Page`].
    size: NonZeroUsize,
}

impl Arguments {
    /// Creates new [`Arguments`] requesting the provided `page` of `size`
    /// items.
    ///
    /// A `page` of `0` is treated as the first page.
    ///
    /// # Errors
    ///
    /// With [`InvalidPageSize`] if the `size` is `0`.
    pub fn new(page: usize, size: usize) -> Result<Self, InvalidPageSize> {
        Ok(Self {
            page: NonZeroUsize::new(page).unwrap_or(NonZeroUsize::MIN),
            size: NonZeroUsize::new(size).ok_or(InvalidPageSize)?,
        })
    }

    /// Returns the requested 1-based page number.
    #[must_use]
    pub const fn page(&self) -> NonZeroUsize {
        self.page
    }

    /// Returns the maximum number of items on a [`Page`].
    #[must_use]
    pub const fn size(&self) -> NonZeroUsize {
        self.size
    }

    /// Returns the number of pages needed to list `total_count` items.
    ///
    /// Always at least `1`, so an empty list still has a single (empty)
    /// page.
    #[must_use]
    pub fn total_pages(&self, total_count: usize) -> NonZeroUsize {
        NonZeroUsize::new(total_count.div_ceil(self.size.get()))
            .unwrap_or(NonZeroUsize::MIN)
    }

    /// Returns the requested page number clamped into the range of existing
    /// pages for `total_count` items.
    #[must_use]
    pub fn effective_page(&self, total_count: usize) -> NonZeroUsize {
        self.page.min(self.total_pages(total_count))
    }
}

/// Error of [`Arguments`] requesting pages of zero items.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("page size must be a positive integer")]
pub struct InvalidPageSize;

/// A single page of items.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Page<T> {
    /// Items on this [`Page`].
    pub items: Vec<T>,

    /// Total number of items across all pages.
    pub total_count: usize,

    /// Total number of pages.
    pub total_pages: usize,

    /// 1-based number of this [`Page`].
    pub page: usize,
}

impl<T> Page<T> {
    /// Cuts the [`Page`] requested by the provided [`Arguments`] out of `all`
    /// the items.
    ///
    /// If the requested page is beyond the last one, the last page is
    /// returned instead.
    #[must_use]
    pub fn cut(all: Vec<T>, args: Arguments) -> Self {
        let total_count = all.len();
        let page = args.effective_page(total_count).get();
        let size = args.size().get();
        let items = all
            .into_iter()
            .skip((page - 1).saturating_mul(size))
            .take(size)
            .collect();

        Self {
            items,
            total_count,
            total_pages: args.total_pages(total_count).get(),
            page,
        }
    }

    /// Maps the items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        let Self {
            items,
            total_count,
            total_pages,
            page,
        } = self;
        Page {
            items: items.into_iter().map(f).collect(),
            total_count,
            total_pages,
            page,
        }
    }
}

crate::define_kind! {
    #[doc = "Order of sorting."]
    enum Order {
        #[doc = "Ascending order."]
        #[code = "asc"]
        Ascending,

        #[doc = "Descending order."]
        #[code = "desc"]
        Descending,
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::Ascending
    }
}

impl Order {
    /// Applies this [`Order`] to the `ordering` of two items compared in
    /// ascending order.
    ///
    /// [`Ordering::Equal`] stays equal in both orders, so stable sorts keep
    /// preserving the input order of equal items.
    #[must_use]
    pub const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod spec {
    use std::cmp::Ordering;

    use super::{Arguments, InvalidPageSize, Order, Page};

    #[test]
    fn rejects_zero_page_size() {
        assert_eq!(Arguments::new(1, 0), Err(InvalidPageSize));
        assert_eq!(Arguments::new(0, 0), Err(InvalidPageSize));
        assert!(Arguments::new(1, 1).is_ok());
    }

    #[test]
    fn treats_zero_page_as_first() {
        let args = Arguments::new(0, 3).unwrap();

        assert_eq!(args.page().get(), 1);
    }

    #[test]
    fn counts_total_pages() {
        let args = Arguments::new(1, 2).unwrap();

        assert_eq!(args.total_pages(0).get(), 1);
        assert_eq!(args.total_pages(1).get(), 1);
        assert_eq!(args.total_pages(2).get(), 1);
        assert_eq!(args.total_pages(3).get(), 2);
        assert_eq!(args.total_pages(5).get(), 3);
    }

    #[test]
    fn clamps_page_beyond_last() {
        let page = Page::cut(vec![1, 2, 3, 4, 5], Arguments::new(5, 2).unwrap());

        assert_eq!(
            page,
            Page {
                items: vec![5],
                total_count: 5,
                total_pages: 3,
                page: 3,
            },
        );
    }

    #[test]
    fn cuts_middle_page() {
        let page =
            Page::cut((1..=10).collect(), Arguments::new(2, 4).unwrap());

        assert_eq!(page.items, vec![5, 6, 7, 8]);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn cuts_empty_list_into_single_page() {
        let page =
            Page::<u8>::cut(Vec::new(), Arguments::new(4, 6).unwrap());

        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn pages_cover_all_items() {
        for total in 0..30_usize {
            for size in 1..8 {
                let all = (0..total).collect::<Vec<_>>();
                let pages = Arguments::new(1, size).unwrap().total_pages(total);

                let seen = (1..=pages.get())
                    .flat_map(|n| {
                        Page::cut(all.clone(), Arguments::new(n, size).unwrap())
                            .items
                    })
                    .collect::<Vec<_>>();

                assert_eq!(seen, all, "total: {total}, size: {size}");
            }
        }
    }

    #[test]
    fn maps_items() {
        let page = Page::cut(vec![1, 2, 3], Arguments::new(1, 2).unwrap())
            .map(|n| n * 10);

        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total_count, 3);
    }

    #[test]
    fn order_reverses_ordering() {
        assert_eq!(Order::Ascending.apply(Ordering::Less), Ordering::Less);
        assert_eq!(Order::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(Order::Descending.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn order_codes() {
        assert_eq!(Order::default(), Order::Ascending);
        assert_eq!(Order::Descending.to_string(), "desc");
        assert_eq!("asc".parse::<Order>().ok(), Some(Order::Ascending));
        assert!("up".parse::<Order>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_page() {
        let page = Page::cut(vec!["a", "b", "c"], Arguments::new(2, 2).unwrap());

        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            serde_json::json!({
                "items": ["c"],
                "total_count": 3,
                "total_pages": 2,
                "page": 2
            }),
        );
    }
}
