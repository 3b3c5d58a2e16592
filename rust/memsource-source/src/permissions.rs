use bitflags::bitflags;
use memsource_common::Access;

bitflags! {
    /// Access directions a source or view allows.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u8 {
        const READ = 1;
        const WRITE = 2;
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

impl Permissions {
    #[inline]
    pub fn allows(self, access: Access) -> bool {
        match access {
            Access::Read => self.contains(Permissions::READ),
            Access::Write => self.contains(Permissions::WRITE),
        }
    }
}

impl Default for Permissions {
    fn default() -> Self {
        Permissions::READ_WRITE
    }
}
