pub const CONTAINER: &str = "min-h-screen bg-gray-50 dark:bg-gray-900 w-full px-4 sm:px-6 lg:px-8";
pub const CARD: &str = "bg-white dark:bg-gray-800 p-6 sm:p-8 rounded-2xl shadow-xl dark:shadow-[0_8px_30px_-12px_rgba(255,255,255,0.1)] max-w-2xl mx-auto border border-gray-100 dark:border-gray-700 backdrop-blur-sm";
pub const TEXT_H1: &str = "text-3xl font-bold text-center text-gray-900 dark:text-white";
pub const TEXT_ACCENT: &str = "bg-clip-text text-transparent bg-gradient-to-r from-yellow-400 to-orange-500";
pub const TEXT_BODY: &str = "text-gray-600 dark:text-gray-300";
pub const WHEEL_CANVAS: &str = "max-w-full h-auto rounded-full transition-all duration-300 cursor-pointer";
