use std::cell::{Ref, RefCell, RefMut};
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::error::{Access, AliasingError};
use crate::haystack::Haystack;
use crate::iter::{MatchIndices, Matches, Split};
use crate::pattern::{DoubleEndedSearcher, Pattern, Searcher};
use crate::result::Match;
use crate::search;

/// Owned haystack that checks search borrows at runtime.
///
/// Any number of shared searches may run at once, an exclusive search excludes every other
/// search. A conflicting request fails right away instead of waiting or panicking.
///
/// [`try_search`](Self::try_search) and [`try_search_mut`](Self::try_search_mut) start a search
/// that holds the haystack until it is exhausted or dropped. [`try_borrow`](Self::try_borrow) and
/// [`try_borrow_mut`](Self::try_borrow_mut) hand out guards that hold it until the guard drops,
/// for callers that want sub-slices back.
#[derive(Debug, Default)]
pub struct HaystackCell<T> {
    items: RefCell<Vec<T>>,
}

impl<T> HaystackCell<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items: RefCell::new(items) }
    }

    /// Starts a shared search, yielding the matches of `pattern`.
    pub fn try_search<'c, P>(
        &'c self,
        pattern: P,
    ) -> Result<SharedMatches<'c, T, P::Searcher>, AliasingError>
    where
        P: Pattern<&'c [T]>,
    {
        let items = self.borrow_shared()?;

        // The elements live behind the `Ref`, which `CellMatches` drops only after the searcher
        let haystack = unsafe { &*(items.as_slice() as *const [T]) };
        Ok(CellMatches::new(pattern.into_searcher(haystack), items))
    }

    /// Starts an exclusive search, yielding the matches of `pattern`.
    pub fn try_search_mut<'c, P>(
        &'c self,
        pattern: P,
    ) -> Result<ExclusiveMatches<'c, T, P::Searcher>, AliasingError>
    where
        P: Pattern<&'c mut [T]>,
    {
        let mut items = self.borrow_exclusive()?;

        let haystack = unsafe { &mut *(items.as_mut_slice() as *mut [T]) };
        Ok(CellMatches::new(pattern.into_searcher(haystack), items))
    }

    pub fn try_borrow(&self) -> Result<SearchGuard<'_, T>, AliasingError> {
        Ok(SearchGuard { items: self.borrow_shared()? })
    }

    pub fn try_borrow_mut(&self) -> Result<SearchGuardMut<'_, T>, AliasingError> {
        Ok(SearchGuardMut { items: self.borrow_exclusive()? })
    }

    pub fn into_inner(self) -> Vec<T> {
        self.items.into_inner()
    }

    fn borrow_shared(&self) -> Result<Ref<'_, Vec<T>>, AliasingError> {
        self.items.try_borrow().map_err(|_| {
            log::debug!("Refusing shared search, haystack is held exclusively");

            AliasingError {
                requested: Access::Shared,
                held: Access::Exclusive,
            }
        })
    }

    fn borrow_exclusive(&self) -> Result<RefMut<'_, Vec<T>>, AliasingError> {
        match self.items.try_borrow_mut() {
            Ok(items) => Ok(items),
            Err(_) => {
                // A failed exclusive borrow does not say who holds the cell
                let held = match self.items.try_borrow() {
                    Ok(_) => Access::Shared,
                    Err(_) => Access::Exclusive,
                };
                log::debug!("Refusing exclusive search, haystack is held ({held})");

                Err(AliasingError {
                    requested: Access::Exclusive,
                    held,
                })
            },
        }
    }
}

impl<T> From<Vec<T>> for HaystackCell<T> {
    fn from(value: Vec<T>) -> Self {
        Self::new(value)
    }
}

pub type SharedMatches<'c, T, S> = CellMatches<&'c [T], S, Ref<'c, Vec<T>>>;
pub type ExclusiveMatches<'c, T, S> = CellMatches<&'c mut [T], S, RefMut<'c, Vec<T>>>;

/// Matches of a search started on a [`HaystackCell`].
///
/// Owns the cell's borrow and gives it back as soon as either end runs out of matches.
pub struct CellMatches<H, S, B> {
    // Tuple fields drop in order, the searcher goes before the borrow it reads through
    state: Option<(S, B)>,
    _haystack: PhantomData<H>,
}

impl<H: Haystack, S: Searcher<H>, B> CellMatches<H, S, B> {
    fn new(searcher: S, borrow: B) -> Self {
        Self {
            state: Some((searcher, borrow)),
            _haystack: PhantomData,
        }
    }

    /// Whether the search still holds the cell.
    pub fn is_holding(&self) -> bool {
        self.state.is_some()
    }

    fn release_if_done(&mut self, found: Option<Match>) -> Option<Match> {
        if found.is_none() {
            log::trace!("Search exhausted, releasing haystack");
            self.state = None;
        }

        found
    }
}

impl<H: Haystack, S: Searcher<H>, B> Iterator for CellMatches<H, S, B> {
    type Item = Match;

    fn next(&mut self) -> Option<Match> {
        let (searcher, _) = self.state.as_mut()?;
        let found = searcher.next_match();
        self.release_if_done(found)
    }
}

impl<H: Haystack, S: DoubleEndedSearcher<H>, B> DoubleEndedIterator for CellMatches<H, S, B> {
    fn next_back(&mut self) -> Option<Match> {
        let (searcher, _) = self.state.as_mut()?;
        let found = searcher.next_match_back();
        self.release_if_done(found)
    }
}

impl<H: Haystack, S: Searcher<H>, B> FusedIterator for CellMatches<H, S, B> {}

/// Shared access to a [`HaystackCell`], held until dropped.
pub struct SearchGuard<'c, T> {
    items: Ref<'c, Vec<T>>,
}

impl<'c, T> SearchGuard<'c, T> {
    pub fn haystack(&self) -> &[T] {
        &self.items
    }

    pub fn search<'g, P: Pattern<&'g [T]>>(&'g self, pattern: P) -> Matches<&'g [T], P::Searcher> {
        search::search(self.haystack(), pattern)
    }

    pub fn split<'g, P: Pattern<&'g [T]>>(&'g self, pattern: P) -> Split<&'g [T], P::Searcher> {
        search::split(self.haystack(), pattern)
    }

    pub fn match_indices<'g, P: Pattern<&'g [T]>>(&'g self, pattern: P) -> MatchIndices<&'g [T], P::Searcher> {
        search::match_indices(self.haystack(), pattern)
    }
}

/// Exclusive access to a [`HaystackCell`], held until dropped.
pub struct SearchGuardMut<'c, T> {
    items: RefMut<'c, Vec<T>>,
}

impl<'c, T> SearchGuardMut<'c, T> {
    pub fn haystack(&self) -> &[T] {
        &self.items
    }

    pub fn haystack_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn search<'g, P: Pattern<&'g [T]>>(&'g self, pattern: P) -> Matches<&'g [T], P::Searcher> {
        search::search(self.haystack(), pattern)
    }

    pub fn split<'g, P: Pattern<&'g mut [T]>>(&'g mut self, pattern: P) -> Split<&'g mut [T], P::Searcher> {
        search::split(self.haystack_mut(), pattern)
    }

    pub fn match_indices<'g, P: Pattern<&'g mut [T]>>(
        &'g mut self,
        pattern: P,
    ) -> MatchIndices<&'g mut [T], P::Searcher> {
        search::match_indices(self.haystack_mut(), pattern)
    }
}
