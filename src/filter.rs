use crate::{codec::CAN_ID_EXTENDED, Frame, Identifier};

/// An (id word, mask word) pair used to program the adapter's acceptance
/// filters. A received id word passes when `word & mask == id & mask`.
///
/// Both words use the id word layout, so the flag bits take part in the
/// comparison. Masks are usually built with [`mask`](crate::mask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AcceptanceFilter {
    id: u32,
    mask: u32,
}

impl AcceptanceFilter {
    /// Lets every frame through. An empty filter list means the same thing.
    pub const ACCEPT_ALL: Self = Self::new(0, 0);

    /// Only lets standard frames through. This is what the adapter starts
    /// with until filters are configured.
    pub const STANDARD_ONLY: Self = Self::new(0, CAN_ID_EXTENDED);

    pub const fn new(id: u32, mask: u32) -> Self {
        Self { id, mask }
    }

    pub const fn for_identifier(id: &Identifier, mask: u32) -> Self {
        Self::new(id.word(), mask)
    }

    pub const fn id(&self) -> u32 {
        self.id
    }

    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// The pair in the form the device configuration call expects
    pub const fn as_pair(&self) -> (u32, u32) {
        (self.id, self.mask)
    }

    pub const fn accepts(&self, word: u32) -> bool {
        word & self.mask == self.id & self.mask
    }

    pub const fn accepts_identifier(&self, id: &Identifier) -> bool {
        self.accepts(id.word())
    }

    pub fn accepts_frame(&self, frame: &Frame) -> bool {
        self.accepts_identifier(&frame.id())
    }
}

impl From<(u32, u32)> for AcceptanceFilter {
    fn from((id, mask): (u32, u32)) -> Self {
        Self::new(id, mask)
    }
}

/// Replaces an empty filter list with [`AcceptanceFilter::ACCEPT_ALL`]
pub fn effective_filters(filters: &[AcceptanceFilter]) -> &[AcceptanceFilter] {
    if filters.is_empty() {
        core::slice::from_ref(&AcceptanceFilter::ACCEPT_ALL)
    } else {
        filters
    }
}

/// Returns true if any of the (effective) filters accepts the id word
pub fn passes_filters(filters: &[AcceptanceFilter], word: u32) -> bool {
    effective_filters(filters)
        .iter()
        .any(|filter| filter.accepts(word))
}

#[cfg(test)]
mod tests {
    use crate::{
        effective_filters, mask, passes_filters, AcceptanceFilter, Frame, Identifier,
        CAN_ID_EXTENDED,
    };

    #[test]
    fn exact_match() {
        let id = Identifier::standard(0x123).unwrap();
        let filter = AcceptanceFilter::for_identifier(&id, mask(0x7FF, true, true));

        assert!(filter.accepts_identifier(&id));
        assert!(!filter.accepts_identifier(&Identifier::standard(0x124).unwrap()));
        assert!(!filter.accepts_identifier(&Identifier::extended(0x123).unwrap()));
        assert!(!filter.accepts_identifier(&Identifier::new(0x123, false, true).unwrap()));
    }

    #[test]
    fn ignores_bits_outside_mask() {
        // Match 0x120..=0x12F, any remote flag
        let filter = AcceptanceFilter::for_identifier(
            &Identifier::standard(0x120).unwrap(),
            mask(0x7F0, true, false),
        );

        assert!(filter.accepts_identifier(&Identifier::standard(0x12F).unwrap()));
        assert!(filter.accepts_identifier(&Identifier::new(0x125, false, true).unwrap()));
        assert!(!filter.accepts_identifier(&Identifier::standard(0x130).unwrap()));
    }

    #[test]
    fn accept_all() {
        let ids = [
            Identifier::standard(0).unwrap(),
            Identifier::new(0x7FF, false, true).unwrap(),
            Identifier::new(0x1FFFFFFF, true, true).unwrap(),
        ];

        for id in ids {
            assert!(AcceptanceFilter::ACCEPT_ALL.accepts_identifier(&id));
        }

        assert_eq!(AcceptanceFilter::ACCEPT_ALL.as_pair(), (0, 0));
        assert_eq!(AcceptanceFilter::default(), AcceptanceFilter::ACCEPT_ALL);
    }

    #[test]
    fn standard_only() {
        let filter = AcceptanceFilter::STANDARD_ONLY;

        assert_eq!(filter.as_pair(), (0, CAN_ID_EXTENDED));
        assert!(filter.accepts_identifier(&Identifier::standard(0x7FF).unwrap()));
        assert!(filter.accepts_identifier(&Identifier::new(0x10, false, true).unwrap()));
        assert!(!filter.accepts_identifier(&Identifier::extended(0x10).unwrap()));
    }

    #[test]
    fn filter_lists() {
        assert_eq!(effective_filters(&[]), &[AcceptanceFilter::ACCEPT_ALL]);
        assert!(passes_filters(&[], 0x4000_0123));

        let filters = [
            AcceptanceFilter::from((0x100, mask(0x7FF, true, false))),
            AcceptanceFilter::from((0x200, mask(0x7FF, true, false))),
        ];
        assert_eq!(effective_filters(&filters), &filters);

        assert!(passes_filters(&filters, 0x100));
        assert!(passes_filters(&filters, 0x200));
        assert!(!passes_filters(&filters, 0x300));
    }

    #[test]
    fn frames() {
        let filter = AcceptanceFilter::STANDARD_ONLY;
        let frame = Frame::decode(&[0x2A, 0x00, 0x00, 0x20, 1]).unwrap();

        assert!(frame.is_extended());
        assert!(!filter.accepts_frame(&frame));
    }
}
